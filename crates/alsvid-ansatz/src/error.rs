//! Error types for the ansatz crate.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur while resolving or assembling a circuit template.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnsatzError {
    /// The template has no qubit count yet.
    #[error("number of qubits is not set")]
    UnboundNumQubits,

    /// Pairwise entanglement is only defined for blocks of one or two qubits.
    #[error("block size {block_size} can be at most 2 for pairwise entanglement")]
    PairwiseBlockTooLarge {
        /// The requested block size.
        block_size: u32,
    },

    /// An explicit connection has the wrong number of indices.
    #[error("connection {connection:?} does not match block size {expected}")]
    ConnectionSizeMismatch {
        /// The offending connection.
        connection: Vec<u32>,
        /// The entangling block's qubit count.
        expected: u32,
    },

    /// An explicit connection references a qubit outside the circuit.
    #[error("connection index {index} out of range for {num_qubits} qubits")]
    ConnectionIndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of qubits in the template.
        num_qubits: u32,
    },

    /// Unrecognized entanglement strategy name.
    #[error("unknown entanglement strategy '{0}'")]
    UnknownEntanglement(String),

    /// Unrecognized entangler gate name.
    #[error("unknown entangler gate '{0}'")]
    UnknownEntangler(String),

    /// The initial state does not fit on the template's qubits.
    #[error("initial state uses {state_qubits} qubits but the template has {num_qubits}")]
    InitialStateTooWide {
        /// Qubit count of the initial-state circuit.
        state_qubits: u32,
        /// Qubit count of the template.
        num_qubits: u32,
    },

    /// An error surfaced by the underlying circuit builder.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for ansatz operations.
pub type AnsatzResult<T> = Result<T, AnsatzError>;
