//! Seeding the product store from the upstream JSON feed.
//!
//! The upstream records are fetched through a [SeedSource], validated and
//! then swapped in for the whole product collection in one transaction.

mod loader;
mod source;

pub use loader::{SeedResponse, Seeder, initialize_database};
pub use source::{DEFAULT_SEED_URL, HttpSeedSource, SeedSource, UpstreamProduct};
