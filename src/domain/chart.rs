//! Chart definitions.
//!
//! A [`ChartSpec`] fully describes one comparison chart: which rows it keeps,
//! which metrics go on each axis, the axis scales, and the output file stem.
//! [`PreparedChart`] is the same spec with its series and axis ranges resolved,
//! ready to hand to a renderer.

use crate::domain::dataset::Selector;
use crate::domain::experiment::{Implementation, Metric};
use anyhow::bail;
use std::fmt;
use std::str::FromStr;

/// The four comparison charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Throughput,
    Latency,
    CacheMisses,
    CyclesPerByte,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Throughput,
        ChartKind::Latency,
        ChartKind::CacheMisses,
        ChartKind::CyclesPerByte,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Throughput => "throughput",
            ChartKind::Latency => "latency",
            ChartKind::CacheMisses => "cache-misses",
            ChartKind::CyclesPerByte => "cycles-per-byte",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Throughput => "throughput_vs_msg_size",
            ChartKind::Latency => "latency_vs_thread_count",
            ChartKind::CacheMisses => "cache_misses_vs_msg_size",
            ChartKind::CyclesPerByte => "cpu_cycles_per_byte",
        }
    }

    pub fn spec(&self, selection: &Selection) -> ChartSpec {
        let threads = selection.threads;
        match self {
            ChartKind::Throughput => ChartSpec {
                kind: *self,
                title: format!("Throughput vs. Message Size ({} Threads)", threads),
                selector: Selector::Threads(threads),
                x_metric: Metric::MessageSize,
                y_metric: Metric::Throughput,
                x_scale: AxisScale::Log,
                y_scale: AxisScale::Linear,
                explicit_x_ticks: true,
            },
            ChartKind::Latency => ChartSpec {
                kind: *self,
                title: format!(
                    "Latency vs. Thread Count (Message Size: {} Bytes)",
                    selection.msg_size
                ),
                selector: Selector::MessageSize(selection.msg_size),
                x_metric: Metric::Threads,
                y_metric: Metric::Latency,
                x_scale: AxisScale::Linear,
                y_scale: AxisScale::Linear,
                explicit_x_ticks: true,
            },
            ChartKind::CacheMisses => ChartSpec {
                kind: *self,
                title: format!("Cache Misses vs. Message Size ({} Threads)", threads),
                selector: Selector::Threads(threads),
                x_metric: Metric::MessageSize,
                y_metric: Metric::CacheMisses,
                x_scale: AxisScale::Log,
                y_scale: AxisScale::Log,
                explicit_x_ticks: true,
            },
            ChartKind::CyclesPerByte => ChartSpec {
                kind: *self,
                title: format!(
                    "CPU Cycles per Byte vs. Message Size ({} Threads)",
                    threads
                ),
                selector: Selector::Threads(threads),
                x_metric: Metric::MessageSize,
                y_metric: Metric::CyclesPerByte,
                x_scale: AxisScale::Log,
                y_scale: AxisScale::Log,
                explicit_x_ticks: true,
            },
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "throughput" => Ok(ChartKind::Throughput),
            "latency" => Ok(ChartKind::Latency),
            "cache-misses" | "cache" => Ok(ChartKind::CacheMisses),
            "cycles-per-byte" | "cpu-cycles" | "cycles" => Ok(ChartKind::CyclesPerByte),
            _ => bail!(
                "Invalid chart: {}. Must be 'throughput', 'latency', 'cache-misses' or 'cycles-per-byte'",
                s
            ),
        }
    }
}

/// Fixed keys used to filter rows for the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Thread count for the message-size charts
    pub threads: u32,
    /// Message size for the latency chart
    pub msg_size: u64,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            threads: 4,
            msg_size: 16384,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

impl fmt::Display for AxisScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisScale::Linear => f.write_str("linear"),
            AxisScale::Log => f.write_str("log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub selector: Selector,
    pub x_metric: Metric,
    pub y_metric: Metric,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    /// Label only the x values present in the dataset (thread counts, message sizes)
    pub explicit_x_ticks: bool,
}

impl ChartSpec {
    pub fn x_label(&self) -> &'static str {
        self.x_metric.axis_label()
    }

    pub fn y_label(&self) -> &'static str {
        self.y_metric.axis_label()
    }
}

/// Closed interval drawn on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    const MARGIN: f64 = 0.05;

    /// Fits a padded range around `values`. Returns `None` when there are no values.
    ///
    /// Log ranges are padded in log10 space and expect strictly positive input.
    pub fn fit(values: &[f64], scale: AxisScale) -> Option<Self> {
        let lo = values.iter().copied().reduce(f64::min)?;
        let hi = values.iter().copied().reduce(f64::max)?;

        match scale {
            AxisScale::Linear => {
                let span = hi - lo;
                let pad = if span > 0.0 {
                    span * Self::MARGIN
                } else if lo != 0.0 {
                    lo.abs() * Self::MARGIN
                } else {
                    1.0
                };
                Some(Self {
                    min: lo - pad,
                    max: hi + pad,
                })
            }
            AxisScale::Log => {
                let (llo, lhi) = (lo.log10(), hi.log10());
                let span = lhi - llo;
                let pad = if span > 0.0 {
                    span * Self::MARGIN
                } else {
                    Self::MARGIN
                };
                Some(Self {
                    min: 10f64.powf(llo - pad),
                    max: 10f64.powf(lhi + pad),
                })
            }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One implementation's points on a chart
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub implementation: Implementation,
    pub points: Vec<(f64, f64)>,
}

/// A chart with data attached, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedChart {
    pub spec: ChartSpec,
    pub series: Vec<Series>,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub x_ticks: Option<Vec<f64>>,
    /// Set for log y axes, see [`log_ticks`]
    pub y_ticks: Option<Vec<f64>>,
}

/// Tick values inside a log range: every decade, plus the 2x and 5x steps
/// when the range spans three decades or fewer.
pub fn log_ticks(range: &AxisRange) -> Vec<f64> {
    if range.min <= 0.0 || range.max <= range.min {
        return Vec::new();
    }

    let lo = range.min.log10().floor() as i32;
    let hi = range.max.log10().ceil() as i32;
    let steps: &[f64] = if hi - lo <= 3 { &[1.0, 2.0, 5.0] } else { &[1.0] };

    (lo..=hi)
        .flat_map(|exp| steps.iter().map(move |step| step * 10f64.powi(exp)))
        .filter(|v| range.contains(*v))
        .collect()
}

/// Compact tick label: integers as-is, large magnitudes in scientific notation.
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() >= 1e5 || value.abs() < 1e-2 {
        return format!("{:.1e}", value).replace(".0e", "e");
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
