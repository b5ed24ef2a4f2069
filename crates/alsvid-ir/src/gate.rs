//! The closed gate catalog.
//!
//! Every gate the library can place is a variant of [`StandardGate`]; there
//! is no dynamic gate dispatch. The catalog covers the single-qubit
//! rotations used in rotation layers, the fixed one- and two-qubit gates
//! used in entanglement layers and state preparation, and the three-qubit
//! entanglers.

use serde::{Deserialize, Serialize};

use crate::param::ParamExpr;

/// A standard gate with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,

    /// Rotation around the X axis.
    Rx(ParamExpr),
    /// Rotation around the Y axis.
    Ry(ParamExpr),
    /// Rotation around the Z axis.
    Rz(ParamExpr),
    /// Phase gate.
    P(ParamExpr),

    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled rotation around X.
    CRx(ParamExpr),
    /// Controlled rotation around Y.
    CRy(ParamExpr),
    /// Controlled rotation around Z.
    CRz(ParamExpr),
    /// Controlled phase gate.
    CP(ParamExpr),
    /// XX rotation gate.
    RXX(ParamExpr),
    /// YY rotation gate.
    RYY(ParamExpr),
    /// ZZ rotation gate.
    RZZ(ParamExpr),

    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Lowercase gate name, as used in OpenQASM.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_)
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_) => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Whether the gate still carries a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// The gate's angle expressions, in declaration order.
    pub fn parameters(&self) -> Vec<&ParamExpr> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p) => vec![p],

            _ => vec![],
        }
    }

    /// Mutable access to the gate's angle expressions.
    pub fn parameters_mut(&mut self) -> Vec<&mut ParamExpr> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p) => vec![p],

            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_arity() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CZ.num_qubits(), 2);
        assert_eq!(StandardGate::RZZ(ParamExpr::pi()).num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
    }

    #[test]
    fn test_parameterized() {
        assert!(!StandardGate::CZ.is_parameterized());
        assert!(!StandardGate::Ry(ParamExpr::constant(PI / 2.0)).is_parameterized());
        assert!(StandardGate::Ry(ParamExpr::symbol("θ[0]")).is_parameterized());
    }

    #[test]
    fn test_names() {
        assert_eq!(StandardGate::Ry(ParamExpr::pi()).name(), "ry");
        assert_eq!(StandardGate::CSwap.name(), "cswap");
    }
}
