//! Register layout calculator for AMD matrix multiply-accumulate
//! instructions.
//!
//! Covers the MFMA instructions of the CDNA 1-3 Instinct accelerators and
//! the WMMA/SWMMAC instructions of RDNA 3-4 GPUs. For a chosen
//! (architecture, instruction) pair the crate answers four families of
//! questions about how the logical matrices A, B, C, D (and, for sparse
//! variants, the compression-index matrix K) map onto vector registers and
//! the SIMD lanes within them:
//!
//! - instruction metadata ([`query::detail`]),
//! - coordinate → register lookup ([`query::get_register`]),
//! - register → coordinate lookup ([`query::matrix_entry`]),
//! - whole-matrix tables ([`query::register_layout`],
//!   [`query::matrix_layout`]).
//!
//! The catalog is process-wide read-only data; every query is a pure
//! computation, safe to share across threads.

pub mod arch;
pub mod catalog;
pub mod error;
pub mod mapping;
pub mod modifier;
pub mod query;
pub mod render;
pub mod types;

pub use arch::Architecture;
pub use catalog::{catalog, Catalog, InstructionDescriptor};
pub use error::{CalcError, Result};
pub use types::{Coordinate, Matrix, Modifiers, RegName, Sign};
