//! Pieces shared by the workspace binaries: logging setup and small HTTP payload types.

pub mod types;
pub mod utils;
