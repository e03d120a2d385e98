mod inquiries_storage;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use shared::models::Inquiry;
use tracing::instrument;

pub use inquiries_storage::InquiriesStorage;

const DATABASE: &str = "freelance_bot";

/// Persistence operations the bot needs for inquiries.
#[async_trait]
pub trait InquiryStore: Send + Sync {
    /// Appends one inquiry and returns the id assigned by the store.
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<String>;
    /// Any inquiry left by `user_id`, if there is one.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Inquiry>>;
    /// Every user id that has at least one inquiry on record.
    async fn distinct_user_ids(&self) -> Result<Vec<i64>>;
}

#[derive(Clone, Debug)]
pub struct Storage {
    inquiries_storage: Arc<InquiriesStorage>,
}
impl Storage {
    /// Connects, checks the server answers and makes sure the inquiries
    /// collection exists.
    #[instrument(name = "connect storage", skip(uri))]
    pub async fn new(uri: &str) -> Result<Self> {
        let client = mongodb::Client::with_uri_str(uri).await?;
        let db = client.database(DATABASE);
        db.run_command(bson::doc! {"ping": 1}).await?;
        tracing::info!("MongoDB ping successful");
        let inquiries_storage = Arc::new(InquiriesStorage::init(db).await?);
        Ok(Self { inquiries_storage })
    }
    pub fn inquiries(&self) -> Arc<InquiriesStorage> {
        self.inquiries_storage.clone()
    }
}
