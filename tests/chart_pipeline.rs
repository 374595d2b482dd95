use copybench::application::charts::ChartService;
use copybench::domain::chart::{ChartKind, PreparedChart, Selection};
use copybench::domain::errors::ChartError;
use copybench::domain::experiment::Implementation;
use copybench::domain::ports::{ChartRenderer, OutputFormat};
use copybench::infrastructure::embedded;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

// --- Mocks ---

#[derive(Default)]
struct RecordingRenderer {
    format: Option<OutputFormat>,
    fail_on: Option<ChartKind>,
    calls: RefCell<Vec<(PathBuf, PreparedChart)>>,
}

impl ChartRenderer for RecordingRenderer {
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Png)
    }

    fn render(&self, chart: &PreparedChart, path: &Path) -> Result<(), ChartError> {
        if self.fail_on == Some(chart.spec.kind) {
            return Err(ChartError::Backend {
                chart: chart.spec.kind,
                reason: "font not found".to_string(),
            });
        }
        std::fs::write(path, b"").map_err(|e| ChartError::Backend {
            chart: chart.spec.kind,
            reason: e.to_string(),
        })?;
        self.calls
            .borrow_mut()
            .push((path.to_path_buf(), chart.clone()));
        Ok(())
    }
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect()
}

#[test]
fn test_render_all_writes_four_named_files() {
    let dir = tempfile::tempdir().unwrap();
    let ds = embedded::load().unwrap();
    let service = ChartService::new(RecordingRenderer::default(), Selection::default());

    let written = service.render_all(&ds, &ChartKind::ALL, dir.path()).unwrap();

    assert_eq!(
        file_names(&written),
        vec![
            "throughput_vs_msg_size.png",
            "latency_vs_thread_count.png",
            "cache_misses_vs_msg_size.png",
            "cpu_cycles_per_byte.png",
        ]
    );
    for path in &written {
        assert!(path.exists(), "{} missing", path.display());
        assert_eq!(path.parent().unwrap(), dir.path());
    }
}

#[test]
fn test_each_chart_gets_three_series_in_canonical_order() {
    let dir = tempfile::tempdir().unwrap();
    let ds = embedded::load().unwrap();
    let service = ChartService::new(RecordingRenderer::default(), Selection::default());

    service.render_all(&ds, &ChartKind::ALL, dir.path()).unwrap();

    let calls = service.renderer().calls.borrow();
    assert_eq!(calls.len(), 4);
    for (_, chart) in calls.iter() {
        let order: Vec<Implementation> = chart.series.iter().map(|s| s.implementation).collect();
        assert_eq!(order, Implementation::ALL.to_vec());
        assert!(chart.series.iter().all(|s| s.points.len() == 4));
    }
}

#[test]
fn test_svg_format_and_subset_of_charts() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("plots").join("svg");
    let ds = embedded::load().unwrap();
    let renderer = RecordingRenderer {
        format: Some(OutputFormat::Svg),
        ..Default::default()
    };
    let service = ChartService::new(renderer, Selection::default());

    let written = service
        .render_all(&ds, &[ChartKind::Latency], &nested)
        .unwrap();

    assert_eq!(file_names(&written), vec!["latency_vs_thread_count.svg"]);
    assert!(nested.join("latency_vs_thread_count.svg").exists());
}

#[test]
fn test_custom_selection_changes_filters_and_titles() {
    let dir = tempfile::tempdir().unwrap();
    let ds = embedded::load().unwrap();
    let selection = Selection {
        threads: 8,
        msg_size: 65536,
    };
    let service = ChartService::new(RecordingRenderer::default(), selection);

    service
        .render_all(&ds, &[ChartKind::Throughput, ChartKind::Latency], dir.path())
        .unwrap();

    let calls = service.renderer().calls.borrow();
    let throughput = &calls[0].1;
    assert_eq!(throughput.spec.title, "Throughput vs. Message Size (8 Threads)");
    assert_eq!(
        throughput.series[2].points.last().copied(),
        Some((65536.0, 8.735863))
    );

    let latency = &calls[1].1;
    assert_eq!(
        latency.spec.title,
        "Latency vs. Thread Count (Message Size: 65536 Bytes)"
    );
    assert_eq!(latency.series[0].points[0], (1.0, 19.223828));
}

#[test]
fn test_renderer_failure_names_the_chart() {
    let dir = tempfile::tempdir().unwrap();
    let ds = embedded::load().unwrap();
    let renderer = RecordingRenderer {
        fail_on: Some(ChartKind::CacheMisses),
        ..Default::default()
    };
    let service = ChartService::new(renderer, Selection::default());

    let err = service
        .render_all(&ds, &ChartKind::ALL, dir.path())
        .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("cache_misses_vs_msg_size.png"), "{}", message);
    assert!(message.contains("cache-misses"), "{}", message);
    // charts before the failure were still rendered
    assert_eq!(service.renderer().calls.borrow().len(), 2);
}

#[test]
fn test_unmatched_selection_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let ds = embedded::load().unwrap();
    let selection = Selection {
        threads: 3,
        msg_size: 16384,
    };
    let service = ChartService::new(RecordingRenderer::default(), selection);

    let err = service
        .render_all(&ds, &[ChartKind::Throughput], dir.path())
        .unwrap_err();

    assert!(format!("{:#}", err).contains("threads=3"));
    assert!(service.renderer().calls.borrow().is_empty());
}
