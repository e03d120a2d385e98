use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bson::{Bson, doc};
use shared::models::Inquiry;
use tracing::instrument;

use crate::InquiryStore;

const INQUIRIES_COLLECTION: &str = "inquiries";

#[derive(Clone, Debug)]
pub struct InquiriesStorage {
    collection: mongodb::Collection<Inquiry>,
}

impl InquiriesStorage {
    pub fn new(db: mongodb::Database) -> Self {
        let collection = db.collection(INQUIRIES_COLLECTION);
        Self { collection }
    }
    /// Like [`InquiriesStorage::new`], creating the collection first when the
    /// database does not have it yet.
    pub async fn init(db: mongodb::Database) -> Result<Self> {
        let names = db.list_collection_names().await?;
        if names.iter().any(|n| n == INQUIRIES_COLLECTION) {
            tracing::info!("Inquiries collection already exists");
        } else {
            db.create_collection(INQUIRIES_COLLECTION).await?;
            tracing::info!("Created inquiries collection");
        }
        Ok(Self::new(db))
    }
}

#[async_trait]
impl InquiryStore for InquiriesStorage {
    #[instrument(name = "insert inquiry", skip_all, fields(user_id = inquiry.user_id))]
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<String> {
        let res = self.collection.insert_one(inquiry).await?;
        let id = match res.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Ok(id)
    }
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Inquiry>> {
        let res = self.collection.find_one(doc! {"userId": user_id}).await?;
        Ok(res)
    }
    async fn distinct_user_ids(&self) -> Result<Vec<i64>> {
        let values = self.collection.distinct("userId", doc! {}).await?;
        let mut ids = Vec::with_capacity(values.len());
        for value in values {
            match user_id_from_bson(&value) {
                Ok(id) => ids.push(id),
                Err(e) => tracing::warn!("Skipping stored user id: {e}"),
            }
        }
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }
}

/// Older documents may hold the id as any numeric BSON type.
fn user_id_from_bson(value: &Bson) -> Result<i64> {
    match value {
        Bson::Int64(id) => Ok(*id),
        Bson::Int32(id) => Ok(i64::from(*id)),
        Bson::Double(id) if id.fract() == 0.0 => Ok(*id as i64),
        other => Err(anyhow!("not a user id: {other}")),
    }
}
