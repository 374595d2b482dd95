// Chart preparation and rendering pipeline
pub mod charts;

// Console and JSON summaries of the dataset
pub mod reporting;
