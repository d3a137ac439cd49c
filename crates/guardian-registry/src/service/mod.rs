//! Service layer: the registry orchestrator and the asset transfer engine.

pub mod registry_service;
pub mod transfer_engine;

pub use registry_service::RegistryService;
pub use transfer_engine::AssetTransferEngine;
