//! quadrix-store: equation store backends.
//!
//! Implements the `EquationStore` trait over process memory and a JSON file,
//! plus the configuration that selects between them.

pub mod config;
pub mod json_file;
pub mod memory;
pub mod state;

pub use config::{create_store, load_config, QuadrixConfig, StoreConfig};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
