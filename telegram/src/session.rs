//! Per-chat dialogue storage that forgets idle conversations.
//!
//! Works like teloxide's `InMemStorage`, but every entry remembers when the
//! chat last touched it. An entry that sat idle for longer than the TTL is
//! dropped the next time it is read, and [`SessionStore::purge_expired`]
//! sweeps the rest.

use std::{collections::HashMap, convert::Infallible, sync::Arc, time::Duration};

use futures::future::BoxFuture;
use teloxide::{dispatching::dialogue::Storage, types::ChatId};
use tokio::{sync::Mutex, time::Instant};

struct Entry<D> {
    dialogue: D,
    touched: Instant,
}

pub struct SessionStore<D> {
    ttl: Duration,
    map: Mutex<HashMap<ChatId, Entry<D>>>,
}
impl<D> SessionStore<D> {
    pub fn new(ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            ttl,
            map: Mutex::new(HashMap::new()),
        })
    }
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
    /// Drops every idle session, returning how many went away.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut map = self.map.lock().await;
        let before = map.len();
        map.retain(|_, entry| now.duration_since(entry.touched) < self.ttl);
        before - map.len()
    }
    #[cfg(test)]
    async fn len(&self) -> usize {
        self.map.lock().await.len()
    }
}

impl<D> Storage<D> for SessionStore<D>
where
    D: Clone + Send + 'static,
{
    type Error = Infallible;

    fn remove_dialogue(
        self: Arc<Self>,
        chat_id: ChatId,
    ) -> BoxFuture<'static, Result<(), Self::Error>>
    where
        D: Send + 'static,
    {
        Box::pin(async move {
            self.map.lock().await.remove(&chat_id);
            Ok(())
        })
    }

    fn update_dialogue(
        self: Arc<Self>,
        chat_id: ChatId,
        dialogue: D,
    ) -> BoxFuture<'static, Result<(), Self::Error>>
    where
        D: Send + 'static,
    {
        Box::pin(async move {
            let entry = Entry {
                dialogue,
                touched: Instant::now(),
            };
            self.map.lock().await.insert(chat_id, entry);
            Ok(())
        })
    }

    fn get_dialogue(
        self: Arc<Self>,
        chat_id: ChatId,
    ) -> BoxFuture<'static, Result<Option<D>, Self::Error>> {
        Box::pin(async move {
            let now = Instant::now();
            let mut map = self.map.lock().await;
            let live = map
                .get(&chat_id)
                .map(|entry| now.duration_since(entry.touched) < self.ttl);
            match live {
                Some(true) => Ok(map.get_mut(&chat_id).map(|entry| {
                    entry.touched = now;
                    entry.dialogue.clone()
                })),
                Some(false) => {
                    map.remove(&chat_id);
                    tracing::debug!("Session for chat {chat_id} expired");
                    Ok(None)
                }
                None => Ok(None),
            }
        })
    }
}
