//! OpenQASM 3 export for Alsvid circuits.
//!
//! This crate serializes an [`alsvid_ir::Circuit`] to QASM3 source text.
//! Free template parameters are emitted as `input float[64]`
//! declarations, so an unbound ansatz becomes a program whose angles are
//! supplied at runtime.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Circuit, ParamExpr, QubitId};
//!
//! let mut circuit = Circuit::with_size("demo", 1, 0);
//! circuit.ry(ParamExpr::symbol("θ[0]"), QubitId(0)).unwrap();
//!
//! let qasm = alsvid_qasm3::emit(&circuit).unwrap();
//! assert!(qasm.contains("input float[64] theta_0;"));
//! assert!(qasm.contains("ry(theta_0) q[0];"));
//! ```

pub mod emitter;
pub mod error;

pub use emitter::emit;
pub use error::{EmitError, EmitResult};
