//! Services for data loading and aggregation

pub mod aggregator;
pub mod data_loader;
pub mod dataset;

pub use aggregator::Aggregator;
pub use data_loader::{DataLoaderService, DataSource, LoadResult};
pub use dataset::DatasetService;
