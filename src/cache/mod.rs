// Cache module for local filesystem caching.
// Stores rendered timelines so page views avoid hitting the upstream API.

pub mod paths;
pub mod store;

pub use paths::{cache_dir, timeline_path};
pub use store::{CachedData, read_cached, write_cached};
