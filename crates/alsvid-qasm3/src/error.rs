//! Error types for QASM3 emission.

use thiserror::Error;

/// Errors that can occur while emitting QASM3 source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// A parameter name has no valid QASM3 identifier form.
    #[error("parameter name '{original}' cannot be mapped to a QASM3 identifier")]
    InvalidIdentifier {
        /// The parameter name as it appears in the circuit.
        original: String,
    },
}

/// Result type for emission operations.
pub type EmitResult<T> = Result<T, EmitError>;
