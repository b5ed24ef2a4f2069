//! Circuit instructions: a gate or directive applied to concrete wires.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::param::ParamExpr;
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate.
    Gate(StandardGate),
    /// Layer separator; orders the instructions around it without acting
    /// on the state.
    Barrier,
    /// Measurement into classical bits.
    Measure,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on, in gate-operand order.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction writes (measurement only).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// A gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// A barrier over the given qubits.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// A single-qubit measurement.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Whether this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Whether this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Whether this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// The gate, if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Barrier => "barrier",
            InstructionKind::Measure => "measure",
        }
    }

    /// Angle expressions carried by this instruction.
    pub fn parameters(&self) -> Vec<&ParamExpr> {
        match &self.kind {
            InstructionKind::Gate(g) => g.parameters(),
            _ => vec![],
        }
    }

    /// Mutable access to the angle expressions.
    pub fn parameters_mut(&mut self) -> Vec<&mut ParamExpr> {
        match &mut self.kind {
            InstructionKind::Gate(g) => g.parameters_mut(),
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::gate(StandardGate::H, [QubitId(0)]);
        assert!(inst.is_gate());
        assert_eq!(inst.name(), "h");
        assert!(inst.parameters().is_empty());
    }

    #[test]
    fn test_barrier_instruction() {
        let inst = Instruction::barrier([QubitId(0), QubitId(1), QubitId(2)]);
        assert!(inst.is_barrier());
        assert_eq!(inst.qubits.len(), 3);
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(1), ClbitId(1));
        assert!(inst.is_measure());
        assert_eq!(inst.clbits, vec![ClbitId(1)]);
    }

    #[test]
    fn test_parameters() {
        let mut inst = Instruction::gate(
            StandardGate::Ry(ParamExpr::symbol("θ[0]")),
            [QubitId(0)],
        );
        assert_eq!(inst.parameters().len(), 1);
        for p in inst.parameters_mut() {
            *p = ParamExpr::constant(0.5);
        }
        assert!(!inst.as_gate().unwrap().is_parameterized());
    }
}
