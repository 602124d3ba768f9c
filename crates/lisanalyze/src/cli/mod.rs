//! CLI functionality for the lisanalyze tool
//!
//! This module contains all CLI-related functionality including:
//! - The analyze command (lab data in, result documents out)
//! - The publish command (result documents in, RSS feeds out)
//! - Output formatting and logging

#[cfg(feature = "cli")]
pub mod analyze;
#[cfg(feature = "cli")]
pub mod output;
#[cfg(feature = "cli")]
pub mod publish;
