//! Domain layer: entities, guards, treasury, and the listing table.
//!
//! Everything here is pure and synchronous. The ledger clock is passed in
//! as an explicit `now` argument; effects on external token contracts live
//! in the service layer.

pub mod access;
pub mod entities;
pub mod errors;
pub mod expiry;
pub mod table;
pub mod treasury;

pub use access::*;
pub use entities::*;
pub use errors::*;
pub use expiry::*;
pub use table::*;
pub use treasury::*;
