// Chart definitions and axis handling
pub mod chart;

// Experiment dataset and row selection
pub mod dataset;

// Implementation variants, records, metrics
pub mod experiment;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
