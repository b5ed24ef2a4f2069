//! Gate blocks a template is assembled from.
//!
//! Rotation and entangler kinds are closed enumerations; there is no
//! name- or type-based dispatch. An entanglement block may alternatively
//! be a whole sub-circuit, instantiated once per connection with fresh
//! parameters.

use std::str::FromStr;

use alsvid_ir::{Circuit, ParamExpr, StandardGate};
use serde::{Deserialize, Serialize};

use crate::error::AnsatzError;

/// Single-qubit rotation kinds usable in rotation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationGate {
    /// Rotation around the X axis.
    Rx,
    /// Rotation around the Y axis.
    Ry,
    /// Rotation around the Z axis.
    Rz,
    /// Phase rotation.
    Phase,
}

impl RotationGate {
    /// Parameters consumed per application.
    pub fn num_parameters(&self) -> usize {
        1
    }

    /// The concrete gate, with its angle filled in.
    pub fn to_gate(&self, theta: ParamExpr) -> StandardGate {
        match self {
            RotationGate::Rx => StandardGate::Rx(theta),
            RotationGate::Ry => StandardGate::Ry(theta),
            RotationGate::Rz => StandardGate::Rz(theta),
            RotationGate::Phase => StandardGate::P(theta),
        }
    }
}

/// Entangler gate kinds usable in entanglement layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntanglerGate {
    /// Controlled-X.
    Cx,
    /// Controlled-Y.
    Cy,
    /// Controlled-Z.
    Cz,
    /// Controlled-Hadamard.
    Ch,
    /// SWAP.
    Swap,
    /// iSWAP.
    ISwap,
    /// Controlled X rotation.
    Crx,
    /// Controlled Y rotation.
    Cry,
    /// Controlled Z rotation.
    Crz,
    /// Controlled phase.
    Cp,
    /// XX rotation.
    Rxx,
    /// YY rotation.
    Ryy,
    /// ZZ rotation.
    Rzz,
    /// Toffoli.
    Ccx,
    /// Fredkin.
    Cswap,
}

impl EntanglerGate {
    /// Qubits the entangler acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            EntanglerGate::Ccx | EntanglerGate::Cswap => 3,
            _ => 2,
        }
    }

    /// Parameters consumed per placement.
    pub fn num_parameters(&self) -> usize {
        match self {
            EntanglerGate::Crx
            | EntanglerGate::Cry
            | EntanglerGate::Crz
            | EntanglerGate::Cp
            | EntanglerGate::Rxx
            | EntanglerGate::Ryy
            | EntanglerGate::Rzz => 1,
            _ => 0,
        }
    }

    /// The concrete gate. `params` must hold exactly
    /// [`EntanglerGate::num_parameters`] expressions.
    pub fn to_gate(&self, params: &[ParamExpr]) -> StandardGate {
        match self {
            EntanglerGate::Cx => StandardGate::CX,
            EntanglerGate::Cy => StandardGate::CY,
            EntanglerGate::Cz => StandardGate::CZ,
            EntanglerGate::Ch => StandardGate::CH,
            EntanglerGate::Swap => StandardGate::Swap,
            EntanglerGate::ISwap => StandardGate::ISwap,
            EntanglerGate::Crx => StandardGate::CRx(params[0].clone()),
            EntanglerGate::Cry => StandardGate::CRy(params[0].clone()),
            EntanglerGate::Crz => StandardGate::CRz(params[0].clone()),
            EntanglerGate::Cp => StandardGate::CP(params[0].clone()),
            EntanglerGate::Rxx => StandardGate::RXX(params[0].clone()),
            EntanglerGate::Ryy => StandardGate::RYY(params[0].clone()),
            EntanglerGate::Rzz => StandardGate::RZZ(params[0].clone()),
            EntanglerGate::Ccx => StandardGate::CCX,
            EntanglerGate::Cswap => StandardGate::CSwap,
        }
    }
}

impl FromStr for EntanglerGate {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cx" => Ok(EntanglerGate::Cx),
            "cy" => Ok(EntanglerGate::Cy),
            "cz" => Ok(EntanglerGate::Cz),
            "ch" => Ok(EntanglerGate::Ch),
            "swap" => Ok(EntanglerGate::Swap),
            "iswap" => Ok(EntanglerGate::ISwap),
            "crx" => Ok(EntanglerGate::Crx),
            "cry" => Ok(EntanglerGate::Cry),
            "crz" => Ok(EntanglerGate::Crz),
            "cp" => Ok(EntanglerGate::Cp),
            "rxx" => Ok(EntanglerGate::Rxx),
            "ryy" => Ok(EntanglerGate::Ryy),
            "rzz" => Ok(EntanglerGate::Rzz),
            "ccx" => Ok(EntanglerGate::Ccx),
            "cswap" => Ok(EntanglerGate::Cswap),
            _ => Err(AnsatzError::UnknownEntangler(s.into())),
        }
    }
}

/// One entry of an entanglement layer: a gate kind or a sub-circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntanglementBlock {
    /// A standard entangler gate.
    Gate(EntanglerGate),
    /// A sub-circuit placed once per connection. Its free parameters are
    /// replaced by fresh template parameters at every placement.
    SubCircuit(Circuit),
}

impl EntanglementBlock {
    /// Qubits one placement covers.
    pub fn num_qubits(&self) -> u32 {
        match self {
            EntanglementBlock::Gate(gate) => gate.num_qubits(),
            EntanglementBlock::SubCircuit(circuit) => circuit.num_qubits(),
        }
    }

    /// Parameters consumed per placement.
    pub fn num_parameters(&self) -> usize {
        match self {
            EntanglementBlock::Gate(gate) => gate.num_parameters(),
            EntanglementBlock::SubCircuit(circuit) => circuit.num_parameters(),
        }
    }
}

impl From<EntanglerGate> for EntanglementBlock {
    fn from(gate: EntanglerGate) -> Self {
        EntanglementBlock::Gate(gate)
    }
}

impl From<Circuit> for EntanglementBlock {
    fn from(circuit: Circuit) -> Self {
        EntanglementBlock::SubCircuit(circuit)
    }
}
