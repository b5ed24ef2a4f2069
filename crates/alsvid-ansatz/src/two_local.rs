//! The generic two-layer circuit template.
//!
//! A [`TwoLocal`] value is plain configuration; [`build`] is the assembly
//! function that turns it into a [`Circuit`]. Per repetition the template
//! applies one rotation layer (every rotation block on every active qubit,
//! each application consuming fresh parameters) and one entanglement layer
//! (every entanglement block over its resolved connections), with an
//! optional trailing rotation layer.

use alsvid_ir::{Circuit, ParamExpr, QubitId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::block::{EntanglementBlock, EntanglerGate, RotationGate};
use crate::entanglement::Entanglement;
use crate::error::{AnsatzError, AnsatzResult};

/// Connections per layer, per entanglement block.
///
/// `resolved[layer][block]` is the connection list the block covers in
/// that layer.
pub type ResolvedEntanglement = Vec<Vec<Vec<Vec<u32>>>>;

/// Configuration of a two-layer circuit template.
#[derive(Debug, Clone)]
pub struct TwoLocal {
    name: String,
    num_qubits: Option<u32>,
    rotation_blocks: Vec<RotationGate>,
    entanglement_blocks: Vec<EntanglementBlock>,
    entanglement: Entanglement,
    reps: u32,
    skip_unentangled_qubits: bool,
    skip_final_rotation_layer: bool,
    parameter_prefix: String,
    insert_barriers: bool,
    initial_state: Option<Circuit>,
}

impl TwoLocal {
    /// A template with the default structure: one Ry rotation block, CX
    /// entanglers over full entanglement, three repetitions, parameters
    /// prefixed `θ`, and no qubit count yet.
    pub fn new() -> Self {
        Self {
            name: "two_local".into(),
            num_qubits: None,
            rotation_blocks: vec![RotationGate::Ry],
            entanglement_blocks: vec![EntanglerGate::Cx.into()],
            entanglement: Entanglement::Full,
            reps: 3,
            skip_unentangled_qubits: false,
            skip_final_rotation_layer: false,
            parameter_prefix: "θ".into(),
            insert_barriers: false,
            initial_state: None,
        }
    }

    /// Set the circuit name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the number of qubits.
    #[must_use]
    pub fn with_num_qubits(mut self, num_qubits: u32) -> Self {
        self.num_qubits = Some(num_qubits);
        self
    }

    /// Set the rotation blocks, applied in order within every rotation
    /// layer.
    #[must_use]
    pub fn with_rotation_blocks(mut self, blocks: Vec<RotationGate>) -> Self {
        self.rotation_blocks = blocks;
        self
    }

    /// Set the entanglement blocks, applied in order within every
    /// entanglement layer.
    #[must_use]
    pub fn with_entanglement_blocks(mut self, blocks: Vec<EntanglementBlock>) -> Self {
        self.entanglement_blocks = blocks;
        self
    }

    /// Set the entanglement topology.
    #[must_use]
    pub fn with_entanglement(mut self, entanglement: Entanglement) -> Self {
        self.entanglement = entanglement;
        self
    }

    /// Set how often the rotation/entanglement layer pair repeats.
    #[must_use]
    pub fn with_reps(mut self, reps: u32) -> Self {
        self.reps = reps;
        self
    }

    /// Restrict rotation layers to qubits touched by at least one
    /// entanglement connection.
    #[must_use]
    pub fn with_skip_unentangled_qubits(mut self, skip: bool) -> Self {
        self.skip_unentangled_qubits = skip;
        self
    }

    /// Omit the trailing rotation layer.
    #[must_use]
    pub fn with_skip_final_rotation_layer(mut self, skip: bool) -> Self {
        self.skip_final_rotation_layer = skip;
        self
    }

    /// Set the name prefix of the template parameters.
    #[must_use]
    pub fn with_parameter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.parameter_prefix = prefix.into();
        self
    }

    /// Insert a barrier after every layer.
    #[must_use]
    pub fn with_insert_barriers(mut self, insert: bool) -> Self {
        self.insert_barriers = insert;
        self
    }

    /// Prepend a state-preparation circuit.
    #[must_use]
    pub fn with_initial_state(mut self, initial_state: Circuit) -> Self {
        self.initial_state = Some(initial_state);
        self
    }

    /// Change the qubit count after construction.
    pub fn set_num_qubits(&mut self, num_qubits: Option<u32>) {
        self.num_qubits = num_qubits;
    }

    /// Change the repetition count after construction.
    pub fn set_reps(&mut self, reps: u32) {
        self.reps = reps;
    }

    /// The circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured qubit count, if set.
    pub fn num_qubits(&self) -> Option<u32> {
        self.num_qubits
    }

    /// The rotation blocks.
    pub fn rotation_blocks(&self) -> &[RotationGate] {
        &self.rotation_blocks
    }

    /// The entanglement blocks.
    pub fn entanglement_blocks(&self) -> &[EntanglementBlock] {
        &self.entanglement_blocks
    }

    /// The entanglement topology.
    pub fn entanglement(&self) -> &Entanglement {
        &self.entanglement
    }

    /// The repetition count.
    pub fn reps(&self) -> u32 {
        self.reps
    }

    /// Whether rotations skip unentangled qubits.
    pub fn skip_unentangled_qubits(&self) -> bool {
        self.skip_unentangled_qubits
    }

    /// Whether the trailing rotation layer is omitted.
    pub fn skip_final_rotation_layer(&self) -> bool {
        self.skip_final_rotation_layer
    }

    /// The parameter-name prefix.
    pub fn parameter_prefix(&self) -> &str {
        &self.parameter_prefix
    }

    /// Whether barriers are inserted between layers.
    pub fn insert_barriers(&self) -> bool {
        self.insert_barriers
    }

    /// The initial-state circuit, if any.
    pub fn initial_state(&self) -> Option<&Circuit> {
        self.initial_state.as_ref()
    }

    /// Resolve the entanglement topology for every repetition.
    ///
    /// The topology can change per layer, which influences both the
    /// placed gates and the parameter count, so it is resolved once and
    /// shared by [`build`] and [`TwoLocal::num_parameters`].
    pub fn resolve_entanglement(&self) -> AnsatzResult<ResolvedEntanglement> {
        let n = self.num_qubits.unwrap_or(0);
        (0..self.reps)
            .map(|layer| {
                self.entanglement_blocks
                    .iter()
                    .map(|block| {
                        self.entanglement.connections(n, block.num_qubits(), layer)
                    })
                    .collect()
            })
            .collect()
    }

    /// The qubits rotation layers act on.
    fn active_qubits(&self, resolved: &ResolvedEntanglement) -> FxHashSet<u32> {
        let n = self.num_qubits.unwrap_or(0);
        if !self.skip_unentangled_qubits {
            return (0..n).collect();
        }
        resolved
            .iter()
            .flatten()
            .flatten()
            .flatten()
            .copied()
            .collect()
    }

    /// Number of free parameters the built circuit will have, computed
    /// without building it.
    ///
    /// An unset qubit count yields zero. Recomputed on every call, so
    /// changes via [`TwoLocal::set_num_qubits`] or [`TwoLocal::set_reps`]
    /// are always reflected.
    pub fn num_parameters(&self) -> AnsatzResult<usize> {
        if self.num_qubits.is_none() {
            return Ok(0);
        }
        let resolved = self.resolve_entanglement()?;
        let active = self.active_qubits(&resolved).len();

        let per_rotation_layer: usize = active
            * self
                .rotation_blocks
                .iter()
                .map(RotationGate::num_parameters)
                .sum::<usize>();
        let rotation_layers = self.reps as usize
            + if self.skip_final_rotation_layer { 0 } else { 1 };

        let entanglement: usize = resolved
            .iter()
            .map(|layer| {
                layer
                    .iter()
                    .zip(&self.entanglement_blocks)
                    .map(|(conns, block)| conns.len() * block.num_parameters())
                    .sum::<usize>()
            })
            .sum();

        Ok(per_rotation_layer * rotation_layers + entanglement)
    }
}

impl Default for TwoLocal {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocates sequentially named template parameters.
struct ParamAllocator {
    prefix: String,
    next: usize,
}

impl ParamAllocator {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    fn fresh(&mut self) -> ParamExpr {
        let param = ParamExpr::symbol(format!("{}[{}]", self.prefix, self.next));
        self.next += 1;
        param
    }
}

/// Assemble the circuit a [`TwoLocal`] configuration describes.
pub fn build(config: &TwoLocal) -> AnsatzResult<Circuit> {
    let num_qubits = config.num_qubits.ok_or(AnsatzError::UnboundNumQubits)?;
    let resolved = config.resolve_entanglement()?;
    let active = config.active_qubits(&resolved);

    let mut circuit = Circuit::with_size(config.name.clone(), num_qubits, 0);
    let mut alloc = ParamAllocator::new(&config.parameter_prefix);

    if let Some(initial) = &config.initial_state {
        if initial.num_qubits() > num_qubits {
            return Err(AnsatzError::InitialStateTooWide {
                state_qubits: initial.num_qubits(),
                num_qubits,
            });
        }
        let targets: Vec<QubitId> = (0..initial.num_qubits()).map(QubitId).collect();
        circuit.append(initial, &targets)?;
        if config.insert_barriers {
            circuit.barrier_all()?;
        }
    }

    for layer in &resolved {
        rotation_layer(&mut circuit, config, &active, &mut alloc)?;
        if config.insert_barriers {
            circuit.barrier_all()?;
        }
        entanglement_layer(&mut circuit, config, layer, &mut alloc)?;
        if config.insert_barriers {
            circuit.barrier_all()?;
        }
    }
    if !config.skip_final_rotation_layer {
        rotation_layer(&mut circuit, config, &active, &mut alloc)?;
    }

    Ok(circuit)
}

fn rotation_layer(
    circuit: &mut Circuit,
    config: &TwoLocal,
    active: &FxHashSet<u32>,
    alloc: &mut ParamAllocator,
) -> AnsatzResult<()> {
    for block in &config.rotation_blocks {
        for qubit in 0..circuit.num_qubits() {
            if !active.contains(&qubit) {
                continue;
            }
            circuit.apply(block.to_gate(alloc.fresh()), [QubitId(qubit)])?;
        }
    }
    Ok(())
}

fn entanglement_layer(
    circuit: &mut Circuit,
    config: &TwoLocal,
    layer: &[Vec<Vec<u32>>],
    alloc: &mut ParamAllocator,
) -> AnsatzResult<()> {
    for (block, connections) in config.entanglement_blocks.iter().zip(layer) {
        for connection in connections {
            let qubits: Vec<QubitId> = connection.iter().map(|&i| QubitId(i)).collect();
            match block {
                EntanglementBlock::Gate(gate) => {
                    let params: Vec<ParamExpr> =
                        (0..gate.num_parameters()).map(|_| alloc.fresh()).collect();
                    circuit.apply(gate.to_gate(&params), qubits)?;
                }
                EntanglementBlock::SubCircuit(sub) => {
                    let mapping: FxHashMap<String, ParamExpr> = sub
                        .parameters()
                        .into_iter()
                        .map(|name| (name, alloc.fresh()))
                        .collect();
                    circuit.append(&sub.substituted(&mapping), &qubits)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{InstructionKind, StandardGate};

    fn ryrz_config(num_qubits: u32, reps: u32) -> TwoLocal {
        TwoLocal::new()
            .with_num_qubits(num_qubits)
            .with_rotation_blocks(vec![RotationGate::Ry, RotationGate::Rz])
            .with_entanglement_blocks(vec![EntanglerGate::Cz.into()])
            .with_reps(reps)
    }

    #[test]
    fn test_default_structure() {
        let config = TwoLocal::new().with_num_qubits(2);
        let circuit = build(&config).unwrap();
        // Ry on 2 qubits, 4 rotation layers (reps 3 + final).
        assert_eq!(circuit.num_parameters(), 8);
        assert_eq!(config.num_parameters().unwrap(), 8);
    }

    #[test]
    fn test_layer_and_parameter_order() {
        let circuit = build(&ryrz_config(3, 1)).unwrap();

        // Layer structure: ry ry ry, rz rz rz, cz cz cz, ry ry ry, rz rz rz.
        let names: Vec<&str> = circuit.instructions().iter().map(|i| i.name()).collect();
        let mut expected = vec!["ry"; 3];
        expected.extend(vec!["rz"; 3]);
        expected.extend(vec!["cz"; 3]);
        expected.extend(vec!["ry"; 3]);
        expected.extend(vec!["rz"; 3]);
        assert_eq!(names, expected);

        // Parameters are numbered in construction order.
        let params: Vec<String> = (0..12).map(|i| format!("θ[{i}]")).collect();
        assert_eq!(circuit.parameters(), params);
    }

    #[test]
    fn test_full_entanglement_pairs() {
        let circuit = build(&ryrz_config(3, 1)).unwrap();
        let cz_qubits: Vec<Vec<u32>> = circuit
            .instructions()
            .iter()
            .filter(|inst| inst.name() == "cz")
            .map(|inst| inst.qubits.iter().map(|q| q.0).collect())
            .collect();
        assert_eq!(cz_qubits, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn test_parameterized_entangler_counts() {
        let config = TwoLocal::new()
            .with_num_qubits(3)
            .with_rotation_blocks(vec![RotationGate::Ry])
            .with_entanglement_blocks(vec![EntanglerGate::Crx.into()])
            .with_entanglement(Entanglement::Linear)
            .with_reps(2)
            .with_skip_final_rotation_layer(true);

        // 2 rotation layers of 3 params, 2 entanglement layers of 2
        // connections with 1 param each.
        assert_eq!(config.num_parameters().unwrap(), 10);
        let circuit = build(&config).unwrap();
        assert_eq!(circuit.num_parameters(), 10);
    }

    #[test]
    fn test_skip_unentangled_qubits() {
        let config = TwoLocal::new()
            .with_num_qubits(3)
            .with_rotation_blocks(vec![RotationGate::Ry])
            .with_entanglement_blocks(vec![EntanglerGate::Cz.into()])
            .with_entanglement(Entanglement::Explicit(vec![vec![0, 1]]))
            .with_reps(1)
            .with_skip_unentangled_qubits(true);

        // Qubit 2 is untouched by the entanglement, so it gets no
        // rotations: 2 active qubits, 2 rotation layers.
        assert_eq!(config.num_parameters().unwrap(), 4);

        let circuit = build(&config).unwrap();
        assert!(circuit
            .instructions()
            .iter()
            .all(|inst| inst.qubits.iter().all(|q| q.0 != 2)));
    }

    #[test]
    fn test_barriers_between_layers() {
        let config = ryrz_config(2, 1).with_insert_barriers(true);
        let circuit = build(&config).unwrap();

        let names: Vec<&str> = circuit.instructions().iter().map(|i| i.name()).collect();
        // rot, barrier, ent, barrier, final rot.
        assert_eq!(
            names,
            vec![
                "ry", "ry", "rz", "rz", "barrier", "cz", "barrier", "ry", "ry", "rz", "rz"
            ]
        );
    }

    #[test]
    fn test_initial_state_is_prepended() {
        let mut initial = Circuit::with_size("hf", 2, 0);
        initial.x(QubitId(0)).unwrap().x(QubitId(1)).unwrap();

        let config = ryrz_config(3, 1).with_initial_state(initial);
        let circuit = build(&config).unwrap();

        assert_eq!(circuit.instructions()[0].name(), "x");
        assert_eq!(circuit.instructions()[1].name(), "x");
        // The initial state adds no parameters.
        assert_eq!(circuit.num_parameters(), 12);
    }

    #[test]
    fn test_initial_state_too_wide() {
        let initial = Circuit::with_size("wide", 4, 0);
        let config = ryrz_config(3, 1).with_initial_state(initial);
        assert!(matches!(
            build(&config).unwrap_err(),
            AnsatzError::InitialStateTooWide {
                state_qubits: 4,
                num_qubits: 3
            }
        ));
    }

    #[test]
    fn test_subcircuit_block_gets_fresh_parameters() {
        let mut sub = Circuit::with_size("block", 2, 0);
        sub.cry(ParamExpr::symbol("α"), QubitId(0), QubitId(1))
            .unwrap();

        let config = TwoLocal::new()
            .with_num_qubits(3)
            .with_rotation_blocks(vec![])
            .with_entanglement_blocks(vec![sub.into()])
            .with_entanglement(Entanglement::Linear)
            .with_reps(1)
            .with_skip_final_rotation_layer(true);

        assert_eq!(config.num_parameters().unwrap(), 2);

        let circuit = build(&config).unwrap();
        assert_eq!(circuit.parameters(), vec!["θ[0]", "θ[1]"]);

        // Each placement targets its connection's qubits.
        let cry_qubits: Vec<Vec<u32>> = circuit
            .instructions()
            .iter()
            .map(|inst| inst.qubits.iter().map(|q| q.0).collect())
            .collect();
        assert_eq!(cry_qubits, vec![vec![0, 1], vec![1, 2]]);
    }

    #[test]
    fn test_unbound_num_qubits() {
        let config = TwoLocal::new();
        assert_eq!(config.num_parameters().unwrap(), 0);
        assert!(matches!(
            build(&config).unwrap_err(),
            AnsatzError::UnboundNumQubits
        ));
    }

    #[test]
    fn test_set_num_qubits_recomputes() {
        let mut config = ryrz_config(3, 1);
        assert_eq!(config.num_parameters().unwrap(), 12);
        config.set_num_qubits(Some(5));
        assert_eq!(config.num_parameters().unwrap(), 20);
        config.set_reps(2);
        assert_eq!(config.num_parameters().unwrap(), 30);
    }

    #[test]
    fn test_zero_qubits() {
        let config = ryrz_config(0, 2);
        assert_eq!(config.num_parameters().unwrap(), 0);
        let circuit = build(&config).unwrap();
        assert_eq!(circuit.num_qubits(), 0);
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn test_per_layer_entanglement() {
        let config = TwoLocal::new()
            .with_num_qubits(3)
            .with_rotation_blocks(vec![RotationGate::Ry])
            .with_entanglement_blocks(vec![EntanglerGate::Cx.into()])
            .with_entanglement(Entanglement::per_layer(|layer| {
                if layer == 0 {
                    Entanglement::Linear
                } else {
                    Entanglement::Explicit(vec![vec![2, 0]])
                }
            }))
            .with_reps(2);

        let circuit = build(&config).unwrap();
        let cx_qubits: Vec<Vec<u32>> = circuit
            .instructions()
            .iter()
            .filter(|inst| inst.name() == "cx")
            .map(|inst| inst.qubits.iter().map(|q| q.0).collect())
            .collect();
        assert_eq!(cx_qubits, vec![vec![0, 1], vec![1, 2], vec![2, 0]]);
    }

    #[test]
    fn test_gate_kinds_survive_into_circuit() {
        let config = ryrz_config(2, 1);
        let circuit = build(&config).unwrap();
        let first = circuit.instructions()[0].as_gate().unwrap();
        assert!(matches!(first, StandardGate::Ry(_)));
        assert!(circuit
            .instructions()
            .iter()
            .all(|inst| !matches!(inst.kind, InstructionKind::Measure)));
    }
}
