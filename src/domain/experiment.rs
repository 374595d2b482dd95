use crate::domain::errors::DatasetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Socket transfer strategy under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Implementation {
    /// `recv()` into an intermediate buffer, then `send()`
    TwoCopy,
    /// `sendmsg()` with a scatter-gather iovec
    OneCopy,
    /// `sendmsg()` with `MSG_ZEROCOPY`
    ZeroCopy,
}

impl Implementation {
    /// Canonical order, also used for plotting and legends.
    pub const ALL: [Implementation; 3] = [
        Implementation::TwoCopy,
        Implementation::OneCopy,
        Implementation::ZeroCopy,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Implementation::TwoCopy => "two_copy",
            Implementation::OneCopy => "one_copy",
            Implementation::ZeroCopy => "zero_copy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Implementation::TwoCopy => "Two-Copy",
            Implementation::OneCopy => "One-Copy",
            Implementation::ZeroCopy => "Zero-Copy",
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Implementation {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "two_copy" | "twocopy" => Ok(Implementation::TwoCopy),
            "one_copy" | "onecopy" => Ok(Implementation::OneCopy),
            "zero_copy" | "zerocopy" => Ok(Implementation::ZeroCopy),
            _ => Err(DatasetError::UnknownImplementation {
                name: s.to_string(),
            }),
        }
    }
}

/// A numeric column of an experiment record.
///
/// `CyclesPerByte` is derived: CPU cycles divided by message size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Threads,
    MessageSize,
    Duration,
    Throughput,
    Latency,
    CpuCycles,
    Instructions,
    CacheMisses,
    Branches,
    BranchMisses,
    ContextSwitches,
    CyclesPerByte,
}

impl Metric {
    /// Axis description used on charts
    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::Threads => "Number of Threads",
            Metric::MessageSize => "Message Size (Bytes)",
            Metric::Duration => "Duration (s)",
            Metric::Throughput => "Throughput (Gbps)",
            Metric::Latency => "Average Latency (µs)",
            Metric::CpuCycles => "CPU Cycles",
            Metric::Instructions => "Instructions",
            Metric::CacheMisses => "Cache Misses",
            Metric::Branches => "Branches",
            Metric::BranchMisses => "Branch Misses",
            Metric::ContextSwitches => "Context Switches",
            Metric::CyclesPerByte => "CPU Cycles / Byte",
        }
    }
}

/// One measured run, keyed by (implementation, threads, msg_size).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub implementation: Implementation,
    pub threads: u32,
    pub msg_size: u64,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    #[serde(rename = "throughput")]
    pub throughput_gbps: f64,
    #[serde(rename = "latency")]
    pub latency_us: f64,
    pub cpu_cycles: u64,
    pub instructions: u64,
    pub cache_misses: u64,
    pub branches: u64,
    pub branch_misses: u64,
    pub context_switches: u64,
}

impl ExperimentRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Threads => self.threads as f64,
            Metric::MessageSize => self.msg_size as f64,
            Metric::Duration => self.duration_secs as f64,
            Metric::Throughput => self.throughput_gbps,
            Metric::Latency => self.latency_us,
            Metric::CpuCycles => self.cpu_cycles as f64,
            Metric::Instructions => self.instructions as f64,
            Metric::CacheMisses => self.cache_misses as f64,
            Metric::Branches => self.branches as f64,
            Metric::BranchMisses => self.branch_misses as f64,
            Metric::ContextSwitches => self.context_switches as f64,
            // NaN for an empty message; charts go through `cycles_per_byte`, which rejects it
            Metric::CyclesPerByte if self.msg_size == 0 => f64::NAN,
            Metric::CyclesPerByte => self.cpu_cycles as f64 / self.msg_size as f64,
        }
    }

    /// Cache misses per thousand retired instructions
    pub fn cache_misses_per_kilo_instruction(&self) -> f64 {
        if self.instructions == 0 {
            return 0.0;
        }
        self.cache_misses as f64 * 1000.0 / self.instructions as f64
    }
}
