pub mod connection;
pub mod metrics;
pub mod schema;

pub use connection::Database;
pub use metrics::MetricRecord;
