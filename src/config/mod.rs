//! Configuration module for copybench.
//!
//! Settings are loaded from environment variables (a `.env` file is read
//! first by the binary) and organized by concern: Rendering and Dataset.
//! Every default reproduces the stock chart set, so an empty environment is
//! a valid configuration. Command-line flags override individual fields.

mod dataset_config;
mod render_config;

pub use dataset_config::DatasetEnvConfig;
pub use render_config::RenderEnvConfig;

use crate::domain::chart::Selection;
use crate::domain::ports::OutputFormat;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// Smallest canvas side, in pixels, that still leaves room for axes and footer.
pub const MIN_CHART_PX: u32 = 100;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Rendering (from RenderEnvConfig)
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub chart_width: u32,
    pub chart_height: u32,
    pub system_config: String,

    // Dataset (from DatasetEnvConfig)
    pub data_file: Option<PathBuf>,
    pub selection: Selection,
}

impl Default for Config {
    fn default() -> Self {
        Self::compose(RenderEnvConfig::default(), DatasetEnvConfig::default())
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let render = RenderEnvConfig::from_env().context("Failed to load render config")?;
        let dataset = DatasetEnvConfig::from_env().context("Failed to load dataset config")?;
        let config = Self::compose(render, dataset);
        config.validate()?;
        Ok(config)
    }

    /// Checks settings that env variables and command-line flags can both set.
    pub fn validate(&self) -> Result<()> {
        if self.chart_width < MIN_CHART_PX {
            bail!(
                "Chart width must be at least {} pixels, got {}",
                MIN_CHART_PX,
                self.chart_width
            );
        }
        if self.chart_height < MIN_CHART_PX {
            bail!(
                "Chart height must be at least {} pixels, got {}",
                MIN_CHART_PX,
                self.chart_height
            );
        }
        Ok(())
    }

    fn compose(render: RenderEnvConfig, dataset: DatasetEnvConfig) -> Self {
        Self {
            output_dir: render.output_dir,
            format: render.format,
            chart_width: render.width,
            chart_height: render.height,
            system_config: render.system_config,
            data_file: dataset.data_file,
            selection: dataset.selection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_config_reproduces_stock_charts() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!((config.chart_width, config.chart_height), (1000, 600));
        assert_eq!(config.selection, Selection::default());
        assert!(config.data_file.is_none());
        assert!(config.system_config.contains("i7-8750H"));
    }

    #[test]
    fn test_validate_rejects_small_canvas() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.chart_width = MIN_CHART_PX;
        assert!(config.validate().is_ok());

        config.chart_height = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("PNG").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_str("svg").unwrap(), OutputFormat::Svg);
        assert!(OutputFormat::from_str("jpeg").is_err());
        assert_eq!(OutputFormat::Svg.extension(), "svg");
    }
}
