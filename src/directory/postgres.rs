use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::directory::{
    DirectoryError,
    SubscriberDirectory,
};
use crate::domain::{
    SubscriberId,
    SubscriberRecord,
};

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: Uuid,
    notifications_enabled: bool,
    device_token: Option<String>,
    watched_locations: Vec<String>,
}

impl From<SubscriberRow> for SubscriberRecord {
    fn from(row: SubscriberRow) -> Self {
        SubscriberRecord {
            id: SubscriberId(row.id),
            notifications_enabled: row.notifications_enabled,
            watched_locations: row.watched_locations,
            device_token: row.device_token,
        }
    }
}

/// Subscriber directory backed by the `subscribers` table.
#[derive(Clone, Debug)]
pub struct PostgresDirectory {
    pool: PgPool,
    page_size: u32,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool, page_size: u32) -> Self {
        Self {
            pool,
            page_size: page_size.max(1),
        }
    }

    #[tracing::instrument(name = "Reading a page of subscribers", skip(self))]
    async fn page_after(&self, last_id: Option<Uuid>) -> Result<Vec<SubscriberRow>, sqlx::Error> {
        sqlx::query_as::<_, SubscriberRow>(
            r#"
            SELECT id, notifications_enabled, device_token, watched_locations
            FROM subscribers
            WHERE $1::uuid IS NULL OR id > $1
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(last_id)
        .bind(i64::from(self.page_size))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })
    }
}

#[async_trait]
impl SubscriberDirectory for PostgresDirectory {
    #[tracing::instrument(name = "Listing subscribers", skip(self))]
    async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, DirectoryError> {
        let mut subscribers = Vec::new();
        let mut last_id = None;
        loop {
            let page = self.page_after(last_id).await?;
            let page_len = page.len();
            last_id = page.last().map(|row| row.id);
            subscribers.extend(page.into_iter().map(SubscriberRecord::from));
            if page_len < self.page_size as usize {
                break;
            }
        }
        tracing::info!(count = subscribers.len(), "Subscribers read from directory");
        Ok(subscribers)
    }
}
