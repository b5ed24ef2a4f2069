//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while constructing or binding circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index is outside the circuit.
    #[error("qubit {qubit} out of range for circuit with {num_qubits} qubits (gate: {gate})")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
        /// Name of the operation being applied.
        gate: String,
    },

    /// Classical bit index is outside the circuit.
    #[error("classical bit {clbit} out of range for circuit with {num_clbits} bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: u32,
    },

    /// The same qubit appears twice in one operation.
    #[error("duplicate qubit {qubit} in operation (gate: {gate})")]
    DuplicateQubit {
        /// The duplicated qubit.
        qubit: QubitId,
        /// Name of the operation being applied.
        gate: String,
    },

    /// Gate applied to the wrong number of qubits.
    #[error("gate '{gate}' requires {expected} qubits, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate: String,
        /// Number of qubits the gate acts on.
        expected: u32,
        /// Number of qubits supplied.
        got: u32,
    },

    /// Positional binding received the wrong number of values.
    #[error("circuit has {expected} free parameters, got {got} values")]
    BindingMismatch {
        /// Number of free parameters in the circuit.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Appended circuit does not fit the supplied qubit mapping.
    #[error("cannot append circuit with {inner} qubits onto {mapped} target qubits")]
    AppendMismatch {
        /// Qubit count of the appended circuit.
        inner: u32,
        /// Number of target qubits supplied.
        mapped: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
