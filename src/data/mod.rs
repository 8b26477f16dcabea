//! Dataset loading and saving

pub mod loader;

pub use loader::DataLoader;
