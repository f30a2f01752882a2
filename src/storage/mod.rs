//! Storage abstractions for record persistence.
//!
//! Two record sets live side by side in the data directory:
//!
//! ```text
//! data/
//! ├── config.toml        # Harvester configuration
//! ├── jvnlist.json       # Latest index snapshot (headlines)
//! └── jvn_details.json   # Append-only advisory details
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Detail, Headline};

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for record storage backends.
///
/// A missing record set loads as empty. Saves replace the whole set at once.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Load the last saved index snapshot.
    async fn load_headlines(&self) -> Result<Vec<Headline>>;

    /// Replace the index snapshot.
    async fn save_headlines(&self, headlines: &[Headline]) -> Result<()>;

    /// Load every stored detail.
    async fn load_details(&self) -> Result<Vec<Detail>>;

    /// Replace the stored details.
    async fn save_details(&self, details: &[Detail]) -> Result<()>;
}
