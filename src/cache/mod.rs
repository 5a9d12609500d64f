// Cache module for local filesystem caching.
// Stores provider responses per product id so paid lookups are made once.

pub mod index;
pub mod paths;
pub mod store;

pub use index::{CacheIndex, Entry};
pub use paths::Partition;
pub use store::Store;
