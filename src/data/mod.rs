//! Data module - CSV loading, the bridge table and its aggregations

mod loader;
mod processor;
mod table;

pub use loader::DataLoader;
pub use processor::{AgencyCount, DataProcessor, MapPoint, MaterialTraffic, MAX_OLDEST};
pub use table::BridgeTable;
