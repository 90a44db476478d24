// Twitter API module.
// Provides the upstream client, its collaborator trait, and response types.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::TwitterClient;
pub use endpoints::TimelineApi;
pub use types::*;
