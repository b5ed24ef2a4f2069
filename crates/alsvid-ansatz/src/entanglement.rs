//! Entanglement topologies.
//!
//! A topology decides which qubit tuples the entangling blocks of a layered
//! template act on. Named strategies cover the usual hardware-motivated
//! patterns; explicit lists and per-layer functions cover everything else.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use itertools::Itertools;

use crate::error::{AnsatzError, AnsatzResult};

/// Entanglement structure of a layered circuit template.
#[derive(Clone)]
pub enum Entanglement {
    /// Every size-`m` combination of qubits, in lexicographic order.
    Full,
    /// Neighboring windows `[i, .., i+m-1]`.
    Linear,
    /// [`Entanglement::Linear`], reversed.
    ///
    /// Operationally equal to `Full` for CX entanglers, at n−1 gates
    /// instead of n(n−1)/2.
    ReverseLinear,
    /// Linear plus the wrap-around connection, starting at the
    /// wrap-around block.
    Circular,
    /// Even-index neighbor pairs first, then odd-index pairs. Defined for
    /// block sizes 1 and 2 only.
    Pairwise,
    /// Shifted-circular-alternating: circular, shifted by one per layer,
    /// with blocks upside down on odd layers (circuits 14/15 of
    /// arXiv:1905.10876).
    ShiftedCircularAlternating,
    /// One explicit connection list, used for every layer.
    Explicit(Vec<Vec<u32>>),
    /// A function from layer index to the topology of that layer.
    PerLayer(Arc<dyn Fn(u32) -> Entanglement + Send + Sync>),
}

impl Entanglement {
    /// Per-layer topology from a closure.
    pub fn per_layer(f: impl Fn(u32) -> Entanglement + Send + Sync + 'static) -> Self {
        Entanglement::PerLayer(Arc::new(f))
    }

    /// Resolve the topology to the connections of one layer.
    ///
    /// Each connection is an ordered list of `block_size` qubit indices.
    /// A block that does not fit (`block_size > num_qubits`) resolves to no
    /// connections; zero qubits or a zero-size block likewise resolve
    /// empty. Explicit lists are validated for size and range.
    pub fn connections(
        &self,
        num_qubits: u32,
        block_size: u32,
        layer: u32,
    ) -> AnsatzResult<Vec<Vec<u32>>> {
        let (n, m) = (num_qubits, block_size);
        if n == 0 || m == 0 {
            return Ok(vec![]);
        }

        match self {
            Entanglement::Full => {
                if m > n {
                    return Ok(vec![]);
                }
                Ok((0..n).combinations(m as usize).collect())
            }
            Entanglement::Linear => Ok(linear(n, m)),
            Entanglement::ReverseLinear => {
                let mut conns = linear(n, m);
                conns.reverse();
                Ok(conns)
            }
            Entanglement::Circular => Ok(circular(n, m)),
            Entanglement::Pairwise => match m {
                1 => Ok(linear(n, 1)),
                2 => Ok(pairwise(n)),
                _ => Err(AnsatzError::PairwiseBlockTooLarge { block_size: m }),
            },
            Entanglement::ShiftedCircularAlternating => {
                Ok(shifted_circular_alternating(n, m, layer))
            }
            Entanglement::Explicit(conns) => {
                for conn in conns {
                    if conn.len() != m as usize {
                        return Err(AnsatzError::ConnectionSizeMismatch {
                            connection: conn.clone(),
                            expected: m,
                        });
                    }
                    if let Some(&index) = conn.iter().find(|&&i| i >= n) {
                        return Err(AnsatzError::ConnectionIndexOutOfRange {
                            index,
                            num_qubits: n,
                        });
                    }
                }
                Ok(conns.clone())
            }
            Entanglement::PerLayer(f) => f(layer).connections(n, m, layer),
        }
    }
}

/// Windows `[i, .., i+m-1]` for `i` in `0..=n-m`.
fn linear(n: u32, m: u32) -> Vec<Vec<u32>> {
    if m > n {
        return vec![];
    }
    (0..=n - m).map(|start| (start..start + m).collect()).collect()
}

/// Circular entanglement: `n` blocks wrapping modulo `n`, historically
/// starting at offset `n - m + 1`.
fn circular(n: u32, m: u32) -> Vec<Vec<u32>> {
    if m > n {
        return vec![];
    }
    if m == 1 || n == m {
        return linear(n, m);
    }
    let offset = n - m + 1;
    (0..n)
        .map(|start| (0..m).map(|i| (offset + start + i) % n).collect())
        .collect()
}

/// Even neighbor pairs, then odd neighbor pairs.
fn pairwise(n: u32) -> Vec<Vec<u32>> {
    let lin = linear(n, 2);
    lin.iter()
        .step_by(2)
        .chain(lin.iter().skip(1).step_by(2))
        .cloned()
        .collect()
}

/// Circular, rotated by `layer` blocks, with blocks reversed on odd layers.
fn shifted_circular_alternating(n: u32, m: u32, layer: u32) -> Vec<Vec<u32>> {
    let base = circular(n, m);
    if base.is_empty() {
        return base;
    }
    let split = ((n - (layer % n)) % n) as usize;
    let mut shifted: Vec<Vec<u32>> = base[split..]
        .iter()
        .chain(base[..split].iter())
        .cloned()
        .collect();
    if layer % 2 == 1 {
        for conn in &mut shifted {
            conn.reverse();
        }
    }
    shifted
}

impl fmt::Debug for Entanglement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entanglement::Full => write!(f, "Full"),
            Entanglement::Linear => write!(f, "Linear"),
            Entanglement::ReverseLinear => write!(f, "ReverseLinear"),
            Entanglement::Circular => write!(f, "Circular"),
            Entanglement::Pairwise => write!(f, "Pairwise"),
            Entanglement::ShiftedCircularAlternating => {
                write!(f, "ShiftedCircularAlternating")
            }
            Entanglement::Explicit(conns) => f.debug_tuple("Explicit").field(conns).finish(),
            Entanglement::PerLayer(_) => write!(f, "PerLayer(..)"),
        }
    }
}

impl FromStr for Entanglement {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Entanglement::Full),
            "linear" => Ok(Entanglement::Linear),
            "reverse_linear" => Ok(Entanglement::ReverseLinear),
            "circular" => Ok(Entanglement::Circular),
            "pairwise" => Ok(Entanglement::Pairwise),
            "sca" => Ok(Entanglement::ShiftedCircularAlternating),
            _ => Err(AnsatzError::UnknownEntanglement(s.into())),
        }
    }
}
