//! High-level operations.
//!
//! This module contains the implementation of spoutgen commands.

pub mod generate;
pub mod init;

pub use generate::{generate, generate_with, GenerateOptions, GenerateOutcome, Session};
pub use init::{init_config, InitOptions};
