use crate::domain::chart::{AxisScale, ChartKind};
use crate::domain::dataset::Selector;
use crate::domain::experiment::Implementation;
use thiserror::Error;

/// Errors raised while building or querying a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset contains no experiment records")]
    EmptyDataset,

    #[error("No rows for {implementation}")]
    EmptySeries { implementation: Implementation },

    #[error(
        "Misaligned series for {implementation}: column '{column}' has {actual} values, expected {expected}"
    )]
    MisalignedSeries {
        implementation: Implementation,
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Length mismatch: {left} cycle values vs {right} message sizes")]
    LengthMismatch { left: usize, right: usize },

    #[error("Message size of zero at index {index}")]
    ZeroMessageSize { index: usize },

    #[error("Unknown implementation: {name}")]
    UnknownImplementation { name: String },
}

/// Errors raised while preparing or drawing a chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No data for {chart} with filter {selector}")]
    NoData { chart: ChartKind, selector: Selector },

    #[error("{chart}: value {value} cannot be drawn on a {scale} axis")]
    NonPositiveOnLogAxis {
        chart: ChartKind,
        value: f64,
        scale: AxisScale,
    },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Failed to draw {chart}: {reason}")]
    Backend { chart: ChartKind, reason: String },
}
