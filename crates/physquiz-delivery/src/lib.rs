//! physquiz-delivery — Result delivery and its local fallback.
//!
//! Ships scored results to the configured spreadsheet web-app endpoint,
//! falling back to a durable on-disk store when delivery fails. Also hosts
//! the HTTP question source, the identity-token decoder, and configuration
//! loading.

pub mod config;
pub mod identity;
pub mod mock;
pub mod payload;
pub mod sheets;
pub mod source;
pub mod store;

pub use payload::ResultPayload;
pub use sheets::{DeliveryOutcome, ResultSink, SheetsSink};
pub use store::BackupStore;
