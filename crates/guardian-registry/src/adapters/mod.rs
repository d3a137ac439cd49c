//! Adapters: in-memory implementations of the outbound ports.
//!
//! The token adapters model only the standard transfer/approval interfaces
//! the registry consumes; they double as the reference collaborators for
//! tests.

pub mod clock;
pub mod memory_tokens;

pub use clock::*;
pub use memory_tokens::*;
