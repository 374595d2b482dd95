//! Dataset configuration parsing from environment variables.
//!
//! This module handles the optional CSV source and the fixed row filters.

use crate::domain::chart::Selection;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Dataset environment configuration
#[derive(Debug, Clone, Default)]
pub struct DatasetEnvConfig {
    /// CSV file replacing the embedded measurements
    pub data_file: Option<PathBuf>,
    pub selection: Selection,
}

impl DatasetEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Selection::default();

        let data_file = env::var("COPYBENCH_DATA_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let threads = env::var("COPYBENCH_THREADS")
            .unwrap_or_else(|_| defaults.threads.to_string())
            .parse::<u32>()
            .context("Failed to parse COPYBENCH_THREADS")?;

        let msg_size = env::var("COPYBENCH_MSG_SIZE")
            .unwrap_or_else(|_| defaults.msg_size.to_string())
            .parse::<u64>()
            .context("Failed to parse COPYBENCH_MSG_SIZE")?;

        Ok(Self {
            data_file,
            selection: Selection { threads, msg_size },
        })
    }
}
