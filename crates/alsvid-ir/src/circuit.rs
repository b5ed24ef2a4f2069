//! High-level circuit builder API.
//!
//! A [`Circuit`] is a flat, append-only program over densely indexed qubits
//! and classical bits. There is no graph machinery behind it; templates are
//! built front to back, and per-wire bookkeeping is enough to answer depth
//! queries.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::param::ParamExpr;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// Provides a fluent API for applying gates, plus parameter tracking and
/// positional binding for variational templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// The program, in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_clbits: 0,
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Add a qubit, returning its id.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Add a classical bit, returning its id.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    /// Apply a gate to the given qubits.
    ///
    /// This is the checked entry point all fluent methods go through.
    pub fn apply(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let qubits: Vec<QubitId> = qubits.into_iter().collect();

        let expected = gate.num_qubits();
        if qubits.len() != expected as usize {
            return Err(IrError::ArityMismatch {
                gate: gate.name().into(),
                expected,
                got: qubits.len() as u32,
            });
        }
        self.check_qubits(&qubits, gate.name())?;

        self.instructions.push(Instruction::gate(gate, qubits));
        Ok(self)
    }

    fn check_qubits(&self, qubits: &[QubitId], gate: &str) -> IrResult<()> {
        let mut seen = FxHashSet::default();
        for &q in qubits {
            if q.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                    gate: gate.into(),
                });
            }
            if !seen.insert(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate: gate.into(),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::S, [qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Sdg, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::T, [qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Tdg, [qubit])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::SX, [qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: impl Into<ParamExpr>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rx(theta.into()), [qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: impl Into<ParamExpr>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Ry(theta.into()), [qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: impl Into<ParamExpr>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rz(theta.into()), [qubit])
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: impl Into<ParamExpr>, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::P(theta.into()), [qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CX, [control, target])
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CY, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CZ, [control, target])
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CH, [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Swap, [q1, q2])
    }

    /// Apply iSWAP gate.
    pub fn iswap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::ISwap, [q1, q2])
    }

    /// Apply controlled-Rx gate.
    pub fn crx(
        &mut self,
        theta: impl Into<ParamExpr>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::CRx(theta.into()), [control, target])
    }

    /// Apply controlled-Ry gate.
    pub fn cry(
        &mut self,
        theta: impl Into<ParamExpr>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::CRy(theta.into()), [control, target])
    }

    /// Apply controlled-Rz gate.
    pub fn crz(
        &mut self,
        theta: impl Into<ParamExpr>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::CRz(theta.into()), [control, target])
    }

    /// Apply controlled-phase gate.
    pub fn cp(
        &mut self,
        theta: impl Into<ParamExpr>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::CP(theta.into()), [control, target])
    }

    /// Apply RXX (XX rotation) gate.
    pub fn rxx(
        &mut self,
        theta: impl Into<ParamExpr>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::RXX(theta.into()), [q1, q2])
    }

    /// Apply RYY (YY rotation) gate.
    pub fn ryy(
        &mut self,
        theta: impl Into<ParamExpr>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::RYY(theta.into()), [q1, q2])
    }

    /// Apply RZZ (ZZ rotation) gate.
    pub fn rzz(
        &mut self,
        theta: impl Into<ParamExpr>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(StandardGate::RZZ(theta.into()), [q1, q2])
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CCX, [c1, c2, target])
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CSwap, [control, t1, t2])
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply a barrier to the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        let qubits: Vec<QubitId> = qubits.into_iter().collect();
        self.check_qubits(&qubits, "barrier")?;
        if !qubits.is_empty() {
            self.instructions.push(Instruction::barrier(qubits));
        }
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<QubitId> = (0..self.num_qubits).map(QubitId).collect();
        self.barrier(qubits)
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.check_qubits(&[qubit], "measure")?;
        if clbit.0 >= self.num_clbits {
            return Err(IrError::ClbitOutOfRange {
                clbit,
                num_clbits: self.num_clbits,
            });
        }
        self.instructions.push(Instruction::measure(qubit, clbit));
        Ok(self)
    }

    /// Measure every qubit into the classical bit of the same index,
    /// growing the classical register if needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.num_clbits < self.num_qubits {
            self.add_clbit();
        }
        for i in 0..self.num_qubits {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    /// Append another circuit's instructions, mapping its qubit `i` onto
    /// `qubits[i]`. Classical bit indices are carried over unchanged and
    /// must fit this circuit.
    pub fn append(&mut self, other: &Circuit, qubits: &[QubitId]) -> IrResult<&mut Self> {
        if qubits.len() != other.num_qubits as usize {
            return Err(IrError::AppendMismatch {
                inner: other.num_qubits,
                mapped: qubits.len(),
            });
        }
        for inst in &other.instructions {
            let mapped: Vec<QubitId> = inst.qubits.iter().map(|q| qubits[q.index()]).collect();
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    self.apply(gate.clone(), mapped)?;
                }
                InstructionKind::Barrier => {
                    self.barrier(mapped)?;
                }
                InstructionKind::Measure => {
                    self.measure(mapped[0], inst.clbits[0])?;
                }
            }
        }
        Ok(self)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Names of the free parameters, in first-use order.
    ///
    /// Recomputed on every call; nothing here is cached, so mutations to
    /// the circuit are always reflected.
    pub fn parameters(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut ordered = Vec::new();
        for inst in &self.instructions {
            for param in inst.parameters() {
                param.for_each_symbol(&mut |name| {
                    if seen.insert(name.to_string()) {
                        ordered.push(name.to_string());
                    }
                });
            }
        }
        ordered
    }

    /// Number of free parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Bind all free parameters positionally, returning the bound circuit.
    ///
    /// `values[i]` is assigned to the `i`-th entry of [`Circuit::parameters`].
    pub fn assign(&self, values: &[f64]) -> IrResult<Circuit> {
        let names = self.parameters();
        if names.len() != values.len() {
            return Err(IrError::BindingMismatch {
                expected: names.len(),
                got: values.len(),
            });
        }
        let mapping: FxHashMap<String, ParamExpr> = names
            .into_iter()
            .zip(values.iter().map(|&v| ParamExpr::Const(v)))
            .collect();
        Ok(self.substituted(&mapping))
    }

    /// Replace free parameters according to `mapping`, returning the new
    /// circuit. Symbols absent from the map are left free.
    pub fn substituted(&self, mapping: &FxHashMap<String, ParamExpr>) -> Circuit {
        let mut out = self.clone();
        for inst in &mut out.instructions {
            for param in inst.parameters_mut() {
                *param = param.substitute(mapping).simplify();
            }
        }
        out
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// The instructions, in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Circuit depth: the longest chain of instructions over any wire.
    /// Barriers and measurements count as instructions.
    pub fn depth(&self) -> usize {
        let mut qubit_front = vec![0usize; self.num_qubits as usize];
        let mut clbit_front = vec![0usize; self.num_clbits as usize];
        let mut depth = 0;
        for inst in &self.instructions {
            let level = 1 + inst
                .qubits
                .iter()
                .map(|q| qubit_front[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_front[c.index()]))
                .max()
                .unwrap_or(0);
            for q in &inst.qubits {
                qubit_front[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_front[c.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
        assert_eq!(circuit.instructions().len(), 4);
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = circuit.h(QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cx(QubitId(0), QubitId(0)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_parameter_order_is_first_use() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit
            .ry(ParamExpr::symbol("θ[0]"), QubitId(0))
            .unwrap()
            .ry(ParamExpr::symbol("θ[1]"), QubitId(1))
            .unwrap()
            .rz(ParamExpr::symbol("θ[0]"), QubitId(0))
            .unwrap();

        assert_eq!(circuit.parameters(), vec!["θ[0]", "θ[1]"]);
        assert_eq!(circuit.num_parameters(), 2);
    }

    #[test]
    fn test_assign() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit
            .ry(ParamExpr::symbol("a"), QubitId(0))
            .unwrap()
            .rz(ParamExpr::symbol("b"), QubitId(0))
            .unwrap();

        let bound = circuit.assign(&[PI / 2.0, PI / 4.0]).unwrap();
        assert_eq!(bound.num_parameters(), 0);
        assert_eq!(
            bound.instructions()[0].parameters()[0].as_f64(),
            Some(PI / 2.0)
        );

        let err = circuit.assign(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            IrError::BindingMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_append_remaps_qubits() {
        let mut block = Circuit::with_size("block", 2, 0);
        block.cx(QubitId(0), QubitId(1)).unwrap();

        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.append(&block, &[QubitId(2), QubitId(0)]).unwrap();

        let inst = &circuit.instructions()[0];
        assert_eq!(inst.qubits, vec![QubitId(2), QubitId(0)]);
    }

    #[test]
    fn test_append_size_mismatch() {
        let block = Circuit::with_size("block", 2, 0);
        let mut circuit = Circuit::with_size("test", 3, 0);
        let err = circuit.append(&block, &[QubitId(0)]).unwrap_err();
        assert!(matches!(err, IrError::AppendMismatch { .. }));
    }

    #[test]
    fn test_depth_with_barrier() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.h(QubitId(1)).unwrap();
        // H | barrier | H: the barrier orders the two H gates.
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_empty_barrier_is_dropped() {
        let mut circuit = Circuit::new("test");
        circuit.barrier_all().unwrap();
        assert!(circuit.instructions().is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut circuit = Circuit::with_size("roundtrip", 2, 0);
        circuit
            .ry(ParamExpr::symbol("θ[0]"), QubitId(0))
            .unwrap()
            .cz(QubitId(0), QubitId(1))
            .unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(circuit, back);
    }

    #[test]
    fn test_growing_register() {
        let mut circuit = Circuit::new("grow");
        let q0 = circuit.add_qubit();
        circuit.h(q0).unwrap();
        let q1 = circuit.add_qubit();
        circuit.cx(q0, q1).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
    }
}
