//! Ports: the inbound custody API and the outbound collaborator interfaces.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
