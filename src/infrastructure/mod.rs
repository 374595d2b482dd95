pub mod csv_store;
pub mod embedded;
pub mod observability;
pub mod rendering;

pub use rendering::PlottersRenderer;
