use crate::domain::chart::{
    AxisRange, AxisScale, ChartKind, PreparedChart, Selection, Series, log_ticks,
};
use crate::domain::dataset::{Dataset, cycles_per_byte};
use crate::domain::errors::ChartError;
use crate::domain::experiment::{ExperimentRecord, Metric};
use crate::domain::ports::ChartRenderer;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Turns dataset rows into chart series and hands them to a renderer.
pub struct ChartService<R: ChartRenderer> {
    renderer: R,
    selection: Selection,
}

impl<R: ChartRenderer> ChartService<R> {
    pub fn new(renderer: R, selection: Selection) -> Self {
        Self {
            renderer,
            selection,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Selects the chart's rows per implementation and resolves axis ranges.
    pub fn prepare(&self, dataset: &Dataset, kind: ChartKind) -> Result<PreparedChart, ChartError> {
        let spec = kind.spec(&self.selection);

        let mut series = Vec::new();
        for implementation in dataset.implementations() {
            let rows = dataset.select(implementation, spec.selector);
            if rows.is_empty() {
                debug!("{}: no rows for {} ({})", kind, implementation, spec.selector);
                continue;
            }

            let xs: Vec<f64> = rows.iter().map(|r| r.value(spec.x_metric)).collect();
            let ys = y_values(&rows, spec.y_metric)?;
            series.push(Series {
                implementation,
                points: xs.into_iter().zip(ys).collect(),
            });
        }

        if series.is_empty() {
            return Err(ChartError::NoData {
                chart: kind,
                selector: spec.selector,
            });
        }

        let xs: Vec<f64> = series.iter().flat_map(|s| s.points.iter().map(|p| p.0)).collect();
        let ys: Vec<f64> = series.iter().flat_map(|s| s.points.iter().map(|p| p.1)).collect();
        check_log_axis(kind, &xs, spec.x_scale)?;
        check_log_axis(kind, &ys, spec.y_scale)?;

        let no_data = || ChartError::NoData {
            chart: kind,
            selector: spec.selector,
        };
        let x_range = AxisRange::fit(&xs, spec.x_scale).ok_or_else(no_data)?;
        let y_range = AxisRange::fit(&ys, spec.y_scale).ok_or_else(no_data)?;
        debug!(
            "{}: x [{:.3}, {:.3}] y [{:.3}, {:.3}]",
            kind, x_range.min, x_range.max, y_range.min, y_range.max
        );

        let x_ticks = spec.explicit_x_ticks.then(|| match spec.x_metric {
            Metric::Threads => dataset.thread_counts().into_iter().map(f64::from).collect(),
            Metric::MessageSize => dataset
                .message_sizes()
                .into_iter()
                .map(|s| s as f64)
                .collect(),
            _ => {
                let mut distinct = xs.clone();
                distinct.sort_by(f64::total_cmp);
                distinct.dedup();
                distinct
            }
        });
        let y_ticks = (spec.y_scale == AxisScale::Log).then(|| log_ticks(&y_range));

        Ok(PreparedChart {
            spec,
            series,
            x_range,
            y_range,
            x_ticks,
            y_ticks,
        })
    }

    /// Prepares and renders each chart into `output_dir`, printing progress to stdout.
    pub fn render_all(
        &self,
        dataset: &Dataset,
        kinds: &[ChartKind],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir).with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

        println!("Generating plots...");

        let extension = self.renderer.format().extension();
        let mut written = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let chart = self
                .prepare(dataset, *kind)
                .with_context(|| format!("Failed to prepare {} chart", kind))?;

            let file_name = format!("{}.{}", kind.file_stem(), extension);
            let path = output_dir.join(&file_name);
            self.renderer
                .render(&chart, &path)
                .with_context(|| format!("Failed to render {}", path.display()))?;

            info!("Wrote {} chart to {}", kind, path.display());
            println!("✓ {} generated", file_name);
            written.push(path);
        }

        let names: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect();
        println!("\nAll plots generated successfully!");
        println!("Output files: {}", names.join(", "));

        Ok(written)
    }
}

fn y_values(rows: &[&ExperimentRecord], metric: Metric) -> Result<Vec<f64>, ChartError> {
    match metric {
        Metric::CyclesPerByte => {
            let cycles: Vec<u64> = rows.iter().map(|r| r.cpu_cycles).collect();
            let sizes: Vec<u64> = rows.iter().map(|r| r.msg_size).collect();
            Ok(cycles_per_byte(&cycles, &sizes)?)
        }
        other => Ok(rows.iter().map(|r| r.value(other)).collect()),
    }
}

fn check_log_axis(kind: ChartKind, values: &[f64], scale: AxisScale) -> Result<(), ChartError> {
    if scale != AxisScale::Log {
        return Ok(());
    }
    match values.iter().find(|v| **v <= 0.0) {
        Some(&value) => Err(ChartError::NonPositiveOnLogAxis {
            chart: kind,
            value,
            scale,
        }),
        None => Ok(()),
    }
}
