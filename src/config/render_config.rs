//! Rendering configuration parsing from environment variables.
//!
//! This module handles the output directory, image format, canvas size and
//! the footer text drawn on every chart.

use crate::domain::ports::OutputFormat;
use crate::infrastructure::embedded::SYSTEM_CONFIG;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Rendering environment configuration
#[derive(Debug, Clone)]
pub struct RenderEnvConfig {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub system_config: String,
}

impl Default for RenderEnvConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: OutputFormat::Png,
            width: 1000,
            height: 600,
            system_config: SYSTEM_CONFIG.to_string(),
        }
    }
}

impl RenderEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let output_dir = env::var("COPYBENCH_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let format_str = env::var("COPYBENCH_FORMAT").unwrap_or_else(|_| "png".to_string());
        let format =
            OutputFormat::from_str(&format_str).context("Failed to parse COPYBENCH_FORMAT")?;

        let width = Self::parse_px("COPYBENCH_CHART_WIDTH", defaults.width)?;
        let height = Self::parse_px("COPYBENCH_CHART_HEIGHT", defaults.height)?;

        // single-line .env values carry newlines as "\n"
        let system_config = env::var("COPYBENCH_SYSTEM_CONFIG")
            .map(|s| s.replace("\\n", "\n"))
            .unwrap_or(defaults.system_config);

        Ok(Self {
            output_dir,
            format,
            width,
            height,
            system_config,
        })
    }

    fn parse_px(key: &str, default: u32) -> Result<u32> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u32>()
            .context(format!("Failed to parse {}", key))
    }
}
