//! Alsvid circuit-template library
//!
//! Parameterized circuit templates ("ansätze") for variational quantum
//! algorithms, assembled from repeated rotation and entanglement layers.
//!
//! # Overview
//!
//! The generic structure lives in [`TwoLocal`]: a plain configuration
//! struct describing rotation blocks, entanglement blocks, an
//! [`Entanglement`] topology, and the layer-repetition options. The
//! free-standing [`build`] function assembles a configuration into an
//! [`alsvid_ir::Circuit`] whose free parameters are named sequentially
//! from the configured prefix.
//!
//! Concrete templates such as [`RyRz`] pin parts of the configuration and
//! add what is specific to them — for RYRZ, the `[Ry, Rz]` rotation pair
//! and the fixed `(−π, π)` parameter bounds.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ansatz::{Entanglement, RyRz};
//!
//! let ansatz = RyRz::new(3)
//!     .with_reps(1)
//!     .with_entanglement(Entanglement::Linear);
//!
//! assert_eq!(ansatz.num_parameters().unwrap(), 12);
//!
//! let circuit = ansatz.build().unwrap();
//! assert_eq!(circuit.num_parameters(), 12);
//! ```

pub mod block;
pub mod entanglement;
pub mod error;
pub mod ryrz;
pub mod two_local;

pub use block::{EntanglementBlock, EntanglerGate, RotationGate};
pub use entanglement::Entanglement;
pub use error::{AnsatzError, AnsatzResult};
pub use ryrz::RyRz;
pub use two_local::{build, ResolvedEntanglement, TwoLocal};
