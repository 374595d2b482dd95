use crate::domain::chart::PreparedChart;
use crate::domain::errors::ChartError;
use std::path::Path;

/// Image output format for rendered charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => anyhow::bail!("Invalid output format: {}. Must be 'png' or 'svg'", s),
        }
    }
}

/// Draws a prepared chart to an image file.
pub trait ChartRenderer {
    fn format(&self) -> OutputFormat;

    fn render(&self, chart: &PreparedChart, path: &Path) -> Result<(), ChartError>;
}
