//! Summary reporting for the measurement dataset.
//!
//! Provides a formatted console table and JSON export.

use crate::domain::dataset::{Dataset, Selector};
use crate::domain::experiment::Implementation;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub implementation: Implementation,
    pub threads: u32,
    pub runs: usize,
    pub mean_throughput_gbps: f64,
    pub mean_latency_us: f64,
    pub total_context_switches: u64,
    /// Cache misses per thousand instructions over all runs at this thread count
    pub cache_mpki: f64,
    pub best_throughput_gbps: f64,
    pub best_msg_size: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetReport {
    pub timestamp: DateTime<Utc>,
    pub system_config: String,
    pub total_runs: usize,
    pub rows: Vec<SummaryRow>,
    pub best_performer: String,
}

#[derive(Debug, Default)]
pub struct DatasetReporter;

impl DatasetReporter {
    /// One row per (implementation, thread count), in canonical implementation order.
    pub fn summarize(&self, dataset: &Dataset) -> Vec<SummaryRow> {
        let mut rows = Vec::new();

        for implementation in dataset.implementations() {
            for threads in dataset.thread_counts() {
                let runs = dataset.select(implementation, Selector::Threads(threads));
                let Some(best) = runs
                    .iter()
                    .max_by(|a, b| a.throughput_gbps.total_cmp(&b.throughput_gbps))
                else {
                    continue;
                };

                let n = runs.len() as f64;
                let instructions: u64 = runs.iter().map(|r| r.instructions).sum();
                let cache_misses: u64 = runs.iter().map(|r| r.cache_misses).sum();
                let cache_mpki = if instructions > 0 {
                    cache_misses as f64 * 1000.0 / instructions as f64
                } else {
                    0.0
                };

                rows.push(SummaryRow {
                    implementation,
                    threads,
                    runs: runs.len(),
                    mean_throughput_gbps: runs.iter().map(|r| r.throughput_gbps).sum::<f64>() / n,
                    mean_latency_us: runs.iter().map(|r| r.latency_us).sum::<f64>() / n,
                    total_context_switches: runs.iter().map(|r| r.context_switches).sum(),
                    cache_mpki,
                    best_throughput_gbps: best.throughput_gbps,
                    best_msg_size: best.msg_size,
                });
            }
        }

        rows
    }

    /// Highest single-run throughput in the dataset.
    pub fn best_performer(&self, dataset: &Dataset) -> String {
        dataset
            .records()
            .iter()
            .max_by(|a, b| a.throughput_gbps.total_cmp(&b.throughput_gbps))
            .map(|r| {
                format!(
                    "{} ({:.2} Gbps @ {} B, {} threads)",
                    r.implementation, r.throughput_gbps, r.msg_size, r.threads
                )
            })
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn print_summary(&self, rows: &[SummaryRow]) {
        if rows.is_empty() {
            println!("⚠️ No results to report.");
            return;
        }

        println!("\n{}", "=".repeat(100));
        println!("📊 SOCKET COPY STRATEGY SUMMARY");
        println!("{}", "=".repeat(100));
        println!(
            "{:<10} | {:>7} | {:>4} | {:>10} | {:>12} | {:>10} | {:>8} | {:>16}",
            "Impl", "Threads", "Runs", "Mean Gbps", "Mean Lat µs", "Ctx Sw", "MPKI", "Best Gbps (size)"
        );
        println!("{}", "-".repeat(100));

        let mut previous: Option<Implementation> = None;
        for row in rows {
            if previous.is_some_and(|p| p != row.implementation) {
                println!("{}", "-".repeat(100));
            }
            previous = Some(row.implementation);

            println!(
                "{:<10} | {:>7} | {:>4} | {:>10.3} | {:>12.3} | {:>10} | {:>8.3} | {:>8.3} ({:>5})",
                row.implementation.display_name(),
                row.threads,
                row.runs,
                row.mean_throughput_gbps,
                row.mean_latency_us,
                row.total_context_switches,
                row.cache_mpki,
                row.best_throughput_gbps,
                row.best_msg_size
            );
        }
        println!("{}", "=".repeat(100));
    }

    pub fn build_report(&self, dataset: &Dataset, system_config: &str) -> DatasetReport {
        DatasetReport {
            timestamp: Utc::now(),
            system_config: system_config.trim().to_string(),
            total_runs: dataset.len(),
            rows: self.summarize(dataset),
            best_performer: self.best_performer(dataset),
        }
    }

    pub fn export_json(&self, report: &DatasetReport, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report file {}", path.display()))?;

        info!("Report saved to {}", path.display());
        println!("📝 Report saved to: {}", path.display());
        Ok(path.to_path_buf())
    }
}
