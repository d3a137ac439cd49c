//! # guardian-registry
//!
//! Asset-custody registry with a dead-man-switch release mechanism.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: Authoritative table of per-account listings
//!   (registered ERC20/ERC721 addresses, ether deposits, role addresses).
//! - **Release Protocol**: An owner can redirect all custodied assets to an
//!   emergency contact at any time; a beneficiary can claim them once the
//!   owner's inactivity window elapses.
//! - **Fee Treasury**: Registering an asset address costs a fixed fee,
//!   claimable by the administrator.
//!
//! ## Operation Flow
//!
//! ```text
//! caller ──→ [RegistryService] ──guards──→ AccessGuard / TimeGuard
//!                  │
//!                  ├──stage──→ ListingTable (zero before transfers)
//!                  │
//!                  └──effects──→ AssetTransferEngine ──→ ERC20/ERC721 ports
//!                                (any failure restores the staged listing)
//! ```
//!
//! ## Atomicity
//!
//! The reference execution model is a single serial ledger. Outside a ledger
//! host that guarantee is reproduced explicitly: the whole ledger state sits
//! behind one mutex that is held across each operation, including the
//! synchronous calls out to the token collaborator interfaces. Release
//! operations zero the listing before issuing external transfers and restore
//! it in full if any transfer is rejected.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::*;
