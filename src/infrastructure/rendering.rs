//! Chart rendering with `plotters`.
//!
//! Every chart shares one layout: caption on top, a cartesian plot with a
//! legend, and the host description in a footer band at the bottom right.
//! Axis scales are chosen at runtime, so the plot body is generic over the
//! coordinate types and instantiated once per scale combination.

use crate::domain::chart::{AxisRange, AxisScale, PreparedChart, format_tick, log_ticks};
use crate::domain::errors::ChartError;
use crate::domain::experiment::Implementation;
use crate::domain::ports::{ChartRenderer, OutputFormat};
use plotters::coord::Shift;
use plotters::coord::combinators::WithKeyPoints;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

const FONT: &str = "sans-serif";
const FOOTER_FONT_SIZE: u32 = 12;
const FOOTER_LINE_HEIGHT: i32 = 18;
const FOOTER_PADDING: i32 = 10;
const MARKER_SIZE: u32 = 4;
const STROKE_WIDTH: u32 = 2;

fn series_color(implementation: Implementation) -> RGBColor {
    match implementation {
        Implementation::TwoCopy => RGBColor(31, 119, 180),
        Implementation::OneCopy => RGBColor(255, 127, 14),
        Implementation::ZeroCopy => RGBColor(44, 160, 44),
    }
}

/// Log axis that ticks only at `ticks` (or decade steps when unset) and draws
/// no light grid lines.
fn log_axis(range: AxisRange, ticks: Option<&[f64]>) -> WithKeyPoints<LogCoord<f64>> {
    let points = match ticks {
        Some(ticks) => ticks.iter().copied().filter(|t| range.contains(*t)).collect(),
        None => log_ticks(&range),
    };
    (range.min..range.max).log_scale().with_key_points(points)
}

/// Renders charts to PNG (bitmap backend) or SVG files.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
    format: OutputFormat,
    footer: String,
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32, format: OutputFormat, footer: &str) -> Self {
        Self {
            width,
            height,
            format,
            footer: footer.trim().to_string(),
        }
    }

    fn footer_height(&self) -> i32 {
        let lines = self.footer.lines().count() as i32;
        if lines == 0 {
            0
        } else {
            lines * FOOTER_LINE_HEIGHT + 2 * FOOTER_PADDING
        }
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        chart: &PreparedChart,
    ) -> Result<(), String> {
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let plot_height = (self.height as i32 - self.footer_height()).max(1);
        let (plot_area, footer_area) = root.split_vertically(plot_height);

        let (x, y) = (chart.x_range, chart.y_range);
        let x_ticks = chart.x_ticks.as_deref();
        let y_ticks = chart.y_ticks.as_deref();
        match (chart.spec.x_scale, chart.spec.y_scale) {
            (AxisScale::Linear, AxisScale::Linear) => {
                draw_plot(&plot_area, chart, x.min..x.max, y.min..y.max)?
            }
            (AxisScale::Log, AxisScale::Linear) => {
                draw_plot(&plot_area, chart, log_axis(x, x_ticks), y.min..y.max)?
            }
            (AxisScale::Linear, AxisScale::Log) => {
                draw_plot(&plot_area, chart, x.min..x.max, log_axis(y, y_ticks))?
            }
            (AxisScale::Log, AxisScale::Log) => draw_plot(
                &plot_area,
                chart,
                log_axis(x, x_ticks),
                log_axis(y, y_ticks),
            )?,
        }

        self.draw_footer(&footer_area)?;
        root.present().map_err(|e| e.to_string())?;
        Ok(())
    }

    fn draw_footer<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), String> {
        if self.footer.is_empty() {
            return Ok(());
        }

        let style = (FONT, FOOTER_FONT_SIZE).into_font().color(&BLACK);
        let mut block_width = 0;
        for line in self.footer.lines() {
            let (w, _) = area.estimate_text_size(line, &style).map_err(|e| e.to_string())?;
            block_width = block_width.max(w as i32);
        }

        // right-aligned block, lines left-aligned inside it
        let x = (self.width as i32 - block_width - FOOTER_PADDING).max(0);
        for (i, line) in self.footer.lines().enumerate() {
            let y = FOOTER_PADDING + i as i32 * FOOTER_LINE_HEIGHT;
            area.draw(&Text::new(line, (x, y), style.clone()))
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

fn draw_plot<DB, X, Y>(
    area: &DrawingArea<DB, Shift>,
    chart: &PreparedChart,
    x_spec: X,
    y_spec: Y,
) -> Result<(), String>
where
    DB: DrawingBackend,
    X: AsRangedCoord<Value = f64>,
    Y: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let spec = &chart.spec;
    let mut ctx = ChartBuilder::on(area)
        .caption(&spec.title, (FONT, 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_spec, y_spec)
        .map_err(|e| e.to_string())?;

    let ticks = chart.x_ticks.clone();
    let x_formatter = move |v: &f64| match &ticks {
        Some(ticks) if !ticks.iter().any(|t| (t - v).abs() < 1e-6) => String::new(),
        _ => format_tick(*v),
    };
    let y_formatter = |v: &f64| format_tick(*v);

    {
        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(spec.x_label())
            .y_desc(spec.y_label())
            .axis_desc_style((FONT, 16))
            .label_style((FONT, 13))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .bold_line_style(RGBColor(200, 200, 200))
            .light_line_style(RGBColor(235, 235, 235));
        if chart.spec.x_scale == AxisScale::Linear && chart.x_ticks.is_some() {
            // half-unit steps so that every integer tick gets a grid line
            let span = chart.x_range.max - chart.x_range.min;
            mesh.x_labels((span * 2.0).ceil() as usize + 1);
        }
        mesh.draw().map_err(|e| e.to_string())?;
    }

    for series in &chart.series {
        let color = series_color(series.implementation);
        debug!(
            "{}: drawing {} points for {}",
            spec.kind,
            series.points.len(),
            series.implementation
        );

        ctx.draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(STROKE_WIDTH),
        ))
        .map_err(|e| e.to_string())?
        .label(series.implementation.key())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(STROKE_WIDTH))
        });

        ctx.draw_series(
            series
                .points
                .iter()
                .map(|&p| Circle::new(p, MARKER_SIZE, color.filled())),
        )
        .map_err(|e| e.to_string())?;
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, 14))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| e.to_string())?;

    Ok(())
}

impl ChartRenderer for PlottersRenderer {
    fn format(&self) -> OutputFormat {
        self.format
    }

    fn render(&self, chart: &PreparedChart, path: &Path) -> Result<(), ChartError> {
        let size = (self.width, self.height);
        let result = match self.format {
            OutputFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(&root, chart)
            }
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(&root, chart)
            }
        };

        result.map_err(|reason| ChartError::Backend {
            chart: chart.spec.kind,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_height_tracks_line_count() {
        let renderer = PlottersRenderer::new(1000, 600, OutputFormat::Png, "a\nb\nc\n");
        assert_eq!(renderer.footer_height(), 3 * FOOTER_LINE_HEIGHT + 2 * FOOTER_PADDING);

        let bare = PlottersRenderer::new(1000, 600, OutputFormat::Svg, "  ");
        assert_eq!(bare.footer_height(), 0);
        assert_eq!(bare.format(), OutputFormat::Svg);
    }

    #[test]
    fn test_log_axis_keeps_only_ticks_in_range() {
        let range = AxisRange {
            min: 900.0,
            max: 70000.0,
        };
        let sizes = [512.0, 1024.0, 4096.0, 16384.0, 65536.0];
        let axis = log_axis(range, Some(&sizes[..]));
        assert_eq!(axis.bold_points(), &[1024.0, 4096.0, 16384.0, 65536.0]);
        assert!(axis.light_points().is_empty());

        let decades = log_axis(AxisRange { min: 1.0, max: 1e6 }, None);
        assert_eq!(decades.bold_points().len(), 7);
    }

    #[test]
    fn test_series_colors_are_distinct() {
        let colors: Vec<_> = Implementation::ALL
            .iter()
            .map(|i| series_color(*i))
            .collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
