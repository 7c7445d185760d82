//! One module per subcommand.

pub mod audit_cmd;
pub mod completions;
pub mod decrypt;
pub mod delete;
pub mod download;
pub mod list;
pub mod stats;
pub mod upload;
pub mod verify;
pub mod version;
