//! CSV import/export of experiment records.
//!
//! Column layout:
//! `implementation,threads,msg_size,duration,throughput,latency,cpu_cycles,instructions,cache_misses,branches,branch_misses,context_switches`

use crate::domain::dataset::Dataset;
use crate::domain::experiment::ExperimentRecord;
use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use tracing::{debug, info};

pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<ExperimentRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        // +2: header row and 1-based numbering
        let record: ExperimentRecord =
            result.with_context(|| format!("Invalid experiment record on line {}", line + 2))?;
        records.push(record);
    }
    debug!("Parsed {} experiment records", records.len());
    Ok(records)
}

pub fn write_records<W: io::Write>(writer: W, records: &[ExperimentRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)
            .context("Failed to serialize experiment record")?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Loads a dataset from a CSV file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open dataset file {}", path.display()))?;
    let records = read_records(file)?;
    let dataset = Dataset::from_records(records)
        .with_context(|| format!("Invalid dataset in {}", path.display()))?;
    info!(
        "Loaded {} records from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Writes every record of the dataset to a CSV file.
pub fn export_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_records(file, dataset.records())?;
    info!("Exported {} records to {}", dataset.len(), path.display());
    Ok(())
}
