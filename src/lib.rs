// asin-cache library.
// Cache-first Amazon product lookups: a month-partitioned JSON store, an in-memory
// index over it, and a single-request Rainforest API client behind a fetcher trait.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod rainforest;
pub mod retrieve;

pub use cache::{CacheIndex, Entry, Partition, Store};
pub use config::{Config, MissingPolicy, PartitionScan};
pub use error::{CacheError, Result};
pub use rainforest::{Binding, IdKind, ProductData, ProductFetcher, RainforestClient, Variant};
pub use retrieve::{RetrieveStats, Retriever, lookup_variant};
