// src/io/mod.rs
pub mod loader;

pub use loader::{resolve_data_path, spawn_load};
