use crate::domain::errors::DatasetError;
use crate::domain::experiment::{ExperimentRecord, Implementation};
use std::fmt;

/// Column-oriented measurements for one implementation.
///
/// Every column must have as many entries as `threads`; index `i` across all
/// columns describes one run.
#[derive(Debug, Clone, Copy)]
pub struct ImplementationTable<'a> {
    pub implementation: Implementation,
    pub threads: &'a [u32],
    pub msg_size: &'a [u64],
    pub duration: &'a [u32],
    pub throughput: &'a [f64],
    pub latency: &'a [f64],
    pub cpu_cycles: &'a [u64],
    pub instructions: &'a [u64],
    pub cache_misses: &'a [u64],
    pub branches: &'a [u64],
    pub branch_misses: &'a [u64],
    pub context_switches: &'a [u64],
}

impl ImplementationTable<'_> {
    /// Returns the shared column length, or the first column that disagrees.
    pub fn aligned_len(&self) -> Result<usize, DatasetError> {
        let expected = self.threads.len();
        let columns = [
            ("msg_size", self.msg_size.len()),
            ("duration", self.duration.len()),
            ("throughput", self.throughput.len()),
            ("latency", self.latency.len()),
            ("cpu_cycles", self.cpu_cycles.len()),
            ("instructions", self.instructions.len()),
            ("cache_misses", self.cache_misses.len()),
            ("branches", self.branches.len()),
            ("branch_misses", self.branch_misses.len()),
            ("context_switches", self.context_switches.len()),
        ];

        for (column, actual) in columns {
            if actual != expected {
                return Err(DatasetError::MisalignedSeries {
                    implementation: self.implementation,
                    column,
                    expected,
                    actual,
                });
            }
        }

        Ok(expected)
    }

    fn record(&self, i: usize) -> ExperimentRecord {
        ExperimentRecord {
            implementation: self.implementation,
            threads: self.threads[i],
            msg_size: self.msg_size[i],
            duration_secs: self.duration[i],
            throughput_gbps: self.throughput[i],
            latency_us: self.latency[i],
            cpu_cycles: self.cpu_cycles[i],
            instructions: self.instructions[i],
            cache_misses: self.cache_misses[i],
            branches: self.branches[i],
            branch_misses: self.branch_misses[i],
            context_switches: self.context_switches[i],
        }
    }
}

/// Row filter applied before plotting a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Threads(u32),
    MessageSize(u64),
}

impl Selector {
    pub fn matches(&self, record: &ExperimentRecord) -> bool {
        match self {
            Selector::Threads(n) => record.threads == *n,
            Selector::MessageSize(bytes) => record.msg_size == *bytes,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Threads(n) => write!(f, "threads={}", n),
            Selector::MessageSize(bytes) => write!(f, "msg_size={}", bytes),
        }
    }
}

/// Immutable set of experiment records, grouped by implementation in canonical order.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ExperimentRecord>,
}

impl Dataset {
    pub fn from_tables(tables: &[ImplementationTable<'_>]) -> Result<Self, DatasetError> {
        let mut records = Vec::new();
        for table in tables {
            let len = table.aligned_len()?;
            if len == 0 {
                return Err(DatasetError::EmptySeries {
                    implementation: table.implementation,
                });
            }
            records.extend((0..len).map(|i| table.record(i)));
        }
        Self::from_records(records)
    }

    pub fn from_records(mut records: Vec<ExperimentRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::EmptyDataset);
        }
        // stable: keeps the per-implementation row order
        records.sort_by_key(|r| r.implementation);
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ExperimentRecord] {
        &self.records
    }

    pub fn implementations(&self) -> Vec<Implementation> {
        Implementation::ALL
            .into_iter()
            .filter(|i| self.records.iter().any(|r| r.implementation == *i))
            .collect()
    }

    pub fn rows(&self, implementation: Implementation) -> Vec<&ExperimentRecord> {
        self.records
            .iter()
            .filter(|r| r.implementation == implementation)
            .collect()
    }

    pub fn select(
        &self,
        implementation: Implementation,
        selector: Selector,
    ) -> Vec<&ExperimentRecord> {
        self.records
            .iter()
            .filter(|r| r.implementation == implementation && selector.matches(r))
            .collect()
    }

    pub fn thread_counts(&self) -> Vec<u32> {
        let mut counts: Vec<u32> = self.records.iter().map(|r| r.threads).collect();
        counts.sort_unstable();
        counts.dedup();
        counts
    }

    pub fn message_sizes(&self) -> Vec<u64> {
        let mut sizes: Vec<u64> = self.records.iter().map(|r| r.msg_size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

/// Elementwise `cycles[i] / sizes[i]`.
pub fn cycles_per_byte(cycles: &[u64], sizes: &[u64]) -> Result<Vec<f64>, DatasetError> {
    if cycles.len() != sizes.len() {
        return Err(DatasetError::LengthMismatch {
            left: cycles.len(),
            right: sizes.len(),
        });
    }

    cycles
        .iter()
        .zip(sizes)
        .enumerate()
        .map(|(index, (&c, &s))| {
            if s == 0 {
                Err(DatasetError::ZeroMessageSize { index })
            } else {
                Ok(c as f64 / s as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table<'a>(
        implementation: Implementation,
        threads: &'a [u32],
        msg_size: &'a [u64],
        counters: &'a [u64],
        floats: &'a [f64],
        duration: &'a [u32],
    ) -> ImplementationTable<'a> {
        ImplementationTable {
            implementation,
            threads,
            msg_size,
            duration,
            throughput: floats,
            latency: floats,
            cpu_cycles: counters,
            instructions: counters,
            cache_misses: counters,
            branches: counters,
            branch_misses: counters,
            context_switches: counters,
        }
    }

    #[test]
    fn test_misaligned_column_is_rejected() {
        let t = table(
            Implementation::TwoCopy,
            &[1, 2],
            &[1024, 1024],
            &[10, 20],
            &[1.0],
            &[10, 10],
        );
        match Dataset::from_tables(&[t]) {
            Err(DatasetError::MisalignedSeries {
                column,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(column, "throughput");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected MisalignedSeries, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let t = table(Implementation::OneCopy, &[], &[], &[], &[], &[]);
        assert!(matches!(
            Dataset::from_tables(&[t]),
            Err(DatasetError::EmptySeries {
                implementation: Implementation::OneCopy
            })
        ));
    }

    #[test]
    fn test_records_are_grouped_in_canonical_order() {
        let zero = table(
            Implementation::ZeroCopy,
            &[1, 2],
            &[1024, 4096],
            &[5, 6],
            &[0.5, 0.6],
            &[10, 10],
        );
        let two = table(
            Implementation::TwoCopy,
            &[4],
            &[1024],
            &[7],
            &[0.7],
            &[10],
        );
        let ds = Dataset::from_tables(&[zero, two]).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.implementations(),
            vec![Implementation::TwoCopy, Implementation::ZeroCopy]
        );
        let zero_rows = ds.rows(Implementation::ZeroCopy);
        assert_eq!(zero_rows[0].threads, 1);
        assert_eq!(zero_rows[1].threads, 2);
        assert_eq!(ds.thread_counts(), vec![1, 2, 4]);
        assert_eq!(ds.message_sizes(), vec![1024, 4096]);
    }

    #[test]
    fn test_select_by_selector() {
        let t = table(
            Implementation::TwoCopy,
            &[1, 1, 4, 4],
            &[1024, 4096, 1024, 4096],
            &[1, 2, 3, 4],
            &[0.1, 0.2, 0.3, 0.4],
            &[10, 10, 10, 10],
        );
        let ds = Dataset::from_tables(&[t]).unwrap();

        let by_threads = ds.select(Implementation::TwoCopy, Selector::Threads(4));
        assert_eq!(by_threads.len(), 2);
        assert!(by_threads.iter().all(|r| r.threads == 4));

        let by_size = ds.select(Implementation::TwoCopy, Selector::MessageSize(4096));
        assert_eq!(
            by_size.iter().map(|r| r.threads).collect::<Vec<_>>(),
            vec![1, 4]
        );

        assert!(ds.select(Implementation::OneCopy, Selector::Threads(4)).is_empty());
        assert!(ds.select(Implementation::TwoCopy, Selector::Threads(3)).is_empty());
    }

    #[test]
    fn test_from_records_rejects_empty() {
        assert!(matches!(
            Dataset::from_records(vec![]),
            Err(DatasetError::EmptyDataset)
        ));
    }

    #[test]
    fn test_cycles_per_byte_elementwise() {
        let cpb = cycles_per_byte(&[2048, 8192, 100], &[1024, 4096, 400]).unwrap();
        assert_eq!(cpb, vec![2.0, 2.0, 0.25]);
    }

    #[test]
    fn test_cycles_per_byte_errors() {
        assert!(matches!(
            cycles_per_byte(&[1, 2], &[1]),
            Err(DatasetError::LengthMismatch { left: 2, right: 1 })
        ));
        assert!(matches!(
            cycles_per_byte(&[1, 2], &[1, 0]),
            Err(DatasetError::ZeroMessageSize { index: 1 })
        ));
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(Selector::Threads(4).to_string(), "threads=4");
        assert_eq!(Selector::MessageSize(16384).to_string(), "msg_size=16384");
    }
}
