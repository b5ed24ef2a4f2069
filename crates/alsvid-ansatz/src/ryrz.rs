//! The RYRZ two-local template.
//!
//! Layers of Y plus Z rotations with entanglements, used to prepare trial
//! wave functions for variational algorithms:
//!
//! ```text
//! ┌──────────┐┌──────────┐ ░        ░       ░ ┌───────────┐┌───────────┐
//! ┤ Ry(θ[0]) ├┤ Rz(θ[3]) ├─░──■─────░─ ... ─░─┤ Ry(θ[12]) ├┤ Rz(θ[15]) ├
//! ├──────────┤├──────────┤ ░  │     ░       ░ ├───────────┤├───────────┤
//! ┤ Ry(θ[1]) ├┤ Rz(θ[4]) ├─░──■──■──░─ ... ─░─┤ Ry(θ[13]) ├┤ Rz(θ[16]) ├
//! ├──────────┤├──────────┤ ░     │  ░       ░ ├───────────┤├───────────┤
//! ┤ Ry(θ[2]) ├┤ Rz(θ[5]) ├─░─────■──░─ ... ─░─┤ Ry(θ[14]) ├┤ Rz(θ[17]) ├
//! └──────────┘└──────────┘ ░        ░       ░ └───────────┘└───────────┘
//! ```
//!
//! The structure is entirely delegated to [`TwoLocal`]; this type only
//! pins the rotation blocks to `[Ry, Rz]` and knows that both rotations
//! are 2π-periodic, which fixes every parameter bound to `(−π, π)`.

use std::f64::consts::PI;

use alsvid_ir::Circuit;

use crate::block::{EntanglementBlock, EntanglerGate, RotationGate};
use crate::entanglement::Entanglement;
use crate::error::AnsatzResult;
use crate::two_local::{self, TwoLocal};

/// The RYRZ two-local circuit template.
#[derive(Debug, Clone)]
pub struct RyRz {
    config: TwoLocal,
}

impl RyRz {
    /// A RYRZ template on `num_qubits` qubits with the default structure:
    /// CZ entanglers over full entanglement and three repetitions.
    pub fn new(num_qubits: u32) -> Self {
        Self::default().with_num_qubits(num_qubits)
    }

    /// Set the number of qubits.
    #[must_use]
    pub fn with_num_qubits(mut self, num_qubits: u32) -> Self {
        self.config = self.config.with_num_qubits(num_qubits);
        self
    }

    /// Set the entanglement blocks.
    #[must_use]
    pub fn with_entanglement_blocks(mut self, blocks: Vec<EntanglementBlock>) -> Self {
        self.config = self.config.with_entanglement_blocks(blocks);
        self
    }

    /// Set the entanglement topology.
    #[must_use]
    pub fn with_entanglement(mut self, entanglement: Entanglement) -> Self {
        self.config = self.config.with_entanglement(entanglement);
        self
    }

    /// Set the repetition count.
    #[must_use]
    pub fn with_reps(mut self, reps: u32) -> Self {
        self.config = self.config.with_reps(reps);
        self
    }

    /// Restrict rotations to entangled qubits.
    #[must_use]
    pub fn with_skip_unentangled_qubits(mut self, skip: bool) -> Self {
        self.config = self.config.with_skip_unentangled_qubits(skip);
        self
    }

    /// Omit the trailing rotation layer.
    #[must_use]
    pub fn with_skip_final_rotation_layer(mut self, skip: bool) -> Self {
        self.config = self.config.with_skip_final_rotation_layer(skip);
        self
    }

    /// Set the parameter-name prefix.
    #[must_use]
    pub fn with_parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config = self.config.with_parameter_prefix(prefix);
        self
    }

    /// Insert barriers between layers.
    #[must_use]
    pub fn with_insert_barriers(mut self, insert: bool) -> Self {
        self.config = self.config.with_insert_barriers(insert);
        self
    }

    /// Prepend a state-preparation circuit.
    #[must_use]
    pub fn with_initial_state(mut self, initial_state: Circuit) -> Self {
        self.config = self.config.with_initial_state(initial_state);
        self
    }

    /// Change the qubit count after construction.
    pub fn set_num_qubits(&mut self, num_qubits: u32) {
        self.config.set_num_qubits(Some(num_qubits));
    }

    /// Change the repetition count after construction.
    pub fn set_reps(&mut self, reps: u32) {
        self.config.set_reps(reps);
    }

    /// The underlying two-local configuration.
    pub fn config(&self) -> &TwoLocal {
        &self.config
    }

    /// Number of free parameters of the template.
    pub fn num_parameters(&self) -> AnsatzResult<usize> {
        self.config.num_parameters()
    }

    /// The bounds of every free parameter.
    ///
    /// Both rotations are periodic with period 2π, so every bound is
    /// exactly `(−π, π)` regardless of the rest of the configuration.
    pub fn parameter_bounds(&self) -> AnsatzResult<Vec<(f64, f64)>> {
        Ok(vec![(-PI, PI); self.num_parameters()?])
    }

    /// Assemble the template into a circuit.
    pub fn build(&self) -> AnsatzResult<Circuit> {
        two_local::build(&self.config)
    }
}

impl Default for RyRz {
    /// A RYRZ template with no qubit count yet; assign one with
    /// [`RyRz::set_num_qubits`] or [`RyRz::with_num_qubits`].
    fn default() -> Self {
        Self {
            config: TwoLocal::new()
                .with_name("ryrz")
                .with_rotation_blocks(vec![RotationGate::Ry, RotationGate::Rz])
                .with_entanglement_blocks(vec![EntanglerGate::Cz.into()]),
        }
    }
}
