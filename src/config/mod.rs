//! Configuration loaded from `.reelvault.toml`.

pub mod settings;

pub use settings::Settings;
