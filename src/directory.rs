use async_trait::async_trait;

pub use errors::DirectoryError;
pub use postgres::PostgresDirectory;

use crate::domain::SubscriberRecord;

mod errors;
mod postgres;

/// Read-only view over the registered subscribers.
#[async_trait]
pub trait SubscriberDirectory: Send + Sync {
    /// Every record currently in the directory.
    ///
    /// Implementations must exhaust any paging before returning.
    async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, DirectoryError>;
}
