//! In-memory stand-ins for the store and the outbound sender.

use std::{
    collections::HashSet,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use shared::models::Inquiry;
use storage::InquiryStore;

use crate::admin::Outbox;

#[derive(Default)]
pub struct FakeStore {
    inquiries: Mutex<Vec<Inquiry>>,
    failing: bool,
    queries: AtomicUsize,
}
impl FakeStore {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
    /// Store that already holds one inquiry for each of `user_ids`.
    pub fn with_users(user_ids: &[i64]) -> Self {
        let store = Self::default();
        {
            let mut inquiries = store.inquiries.lock().unwrap();
            for &user_id in user_ids {
                let inquiry = Inquiry::builder()
                    .service("Web Development")
                    .email("a@b.com")
                    .description("Need a site")
                    .user_id(user_id)
                    .build()
                    .unwrap();
                inquiries.push(inquiry);
            }
        }
        store
    }
    pub fn inquiries(&self) -> Vec<Inquiry> {
        self.inquiries.lock().unwrap().clone()
    }
    /// Number of lookups and inserts served so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
    fn hit(&self) -> Result<()> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(anyhow!("store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl InquiryStore for FakeStore {
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<String> {
        self.hit()?;
        let mut inquiries = self.inquiries.lock().unwrap();
        inquiries.push(inquiry.clone());
        Ok(format!("fake-{}", inquiries.len()))
    }
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Inquiry>> {
        self.hit()?;
        let inquiries = self.inquiries.lock().unwrap();
        Ok(inquiries.iter().find(|i| i.user_id == user_id).cloned())
    }
    async fn distinct_user_ids(&self) -> Result<Vec<i64>> {
        self.hit()?;
        let mut seen = HashSet::new();
        let inquiries = self.inquiries.lock().unwrap();
        Ok(inquiries
            .iter()
            .map(|i| i.user_id)
            .filter(|id| seen.insert(*id))
            .collect())
    }
}

/// Records every send; recipients in `failing` get an error, recipients in
/// `hanging` never get an answer.
#[derive(Default)]
pub struct FakeOutbox {
    pub failing: HashSet<i64>,
    pub hanging: HashSet<i64>,
    sent: Mutex<Vec<(i64, String)>>,
    attempts: Mutex<Vec<i64>>,
}
impl FakeOutbox {
    pub fn failing(ids: &[i64]) -> Self {
        Self {
            failing: ids.iter().copied().collect(),
            ..Self::default()
        }
    }
    pub fn hanging(ids: &[i64]) -> Self {
        Self {
            hanging: ids.iter().copied().collect(),
            ..Self::default()
        }
    }
    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
    pub fn attempts(&self) -> Vec<i64> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Outbox for FakeOutbox {
    async fn send_text(&self, user_id: i64, text: &str) -> Result<()> {
        self.attempts.lock().unwrap().push(user_id);
        if self.hanging.contains(&user_id) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(&user_id) {
            return Err(anyhow!("Forbidden: bot was blocked by the user"));
        }
        self.sent.lock().unwrap().push((user_id, text.to_string()));
        Ok(())
    }
}
