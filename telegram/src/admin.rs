use std::{fmt::Display, time::Duration};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::{StreamExt, stream};
use storage::InquiryStore;
use teloxide::{prelude::*, types::ChatId};
use tracing::instrument;

pub const NOT_ADMIN: &str = "Error: Only the admin can use this command.";
const SENDMSG_USAGE: &str = "Usage: /sendmsg <userId> <message>";
const SENDALL_USAGE: &str = "Usage: /sendall <message>";
const NO_RECIPIENTS: &str = "No users found in the inquiries collection.";
const BROADCAST_FAILED: &str = "Error broadcasting message. Please try again later.";

/// Delivers a plain text message to a user.
#[async_trait]
pub trait Outbox: Send + Sync {
    async fn send_text(&self, user_id: i64, text: &str) -> Result<()>;
}

#[async_trait]
impl Outbox for Bot {
    async fn send_text(&self, user_id: i64, text: &str) -> Result<()> {
        self.send_message(ChatId(user_id), text).await?;
        Ok(())
    }
}

/// Operator commands, allowed for a single configured user.
#[derive(Clone, Debug)]
pub struct Admin {
    pub id: i64,
    /// Sends in flight at once during a broadcast
    pub concurrency: usize,
    /// Per-recipient limit on a single send
    pub send_timeout: Duration,
}

/// Tally of one broadcast.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub sent: usize,
    pub errors: Vec<String>,
}
impl BroadcastReport {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}
impl Display for BroadcastReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Broadcast completed: {sent} messages sent successfully, {failed} failed.",
            sent = self.sent,
            failed = self.failed()
        )?;
        if !self.errors.is_empty() {
            write!(f, "\nErrors:\n{}", self.errors.join("\n"))?;
        }
        Ok(())
    }
}

impl Admin {
    pub fn is_admin(&self, caller: i64) -> bool {
        caller == self.id
    }

    /// `/sendmsg <userId> <message>`; returns the reply for the caller.
    #[instrument(name = "admin send", skip(self, args, store, outbox))]
    pub async fn send_to_user(
        &self,
        caller: i64,
        args: &str,
        store: &dyn InquiryStore,
        outbox: &dyn Outbox,
    ) -> String {
        if !self.is_admin(caller) {
            tracing::warn!("Rejected /sendmsg from non-admin");
            return NOT_ADMIN.to_string();
        }
        let mut tokens = args.split_whitespace();
        let (Some(raw_id), Some(first)) = (tokens.next(), tokens.next()) else {
            return SENDMSG_USAGE.to_string();
        };
        let message = std::iter::once(first).chain(tokens).collect::<Vec<_>>().join(" ");
        let Ok(user_id) = raw_id.parse::<i64>() else {
            return format!("Error: No user found with ID {raw_id}.");
        };
        match self.send_to_known(user_id, &message, store, outbox).await {
            Ok(true) => {
                tracing::info!("Message sent to user {user_id}");
                format!("Message sent to user {user_id}: {message}")
            }
            Ok(false) => format!("Error: No user found with ID {user_id}."),
            Err(e) => {
                tracing::error!("Error sending message to {user_id}: {e:?}");
                format!("Error sending message to user {user_id}: {e}")
            }
        }
    }

    /// Sends only to users with an inquiry on record; `false` if there is none.
    async fn send_to_known(
        &self,
        user_id: i64,
        message: &str,
        store: &dyn InquiryStore,
        outbox: &dyn Outbox,
    ) -> Result<bool> {
        if store.find_by_user_id(user_id).await?.is_none() {
            return Ok(false);
        }
        outbox.send_text(user_id, message).await?;
        Ok(true)
    }

    /// `/sendall <message>`; returns the reply for the caller.
    #[instrument(name = "admin broadcast", skip(self, args, store, outbox))]
    pub async fn broadcast(
        &self,
        caller: i64,
        args: &str,
        store: &dyn InquiryStore,
        outbox: &dyn Outbox,
    ) -> String {
        if !self.is_admin(caller) {
            tracing::warn!("Rejected /sendall from non-admin");
            return NOT_ADMIN.to_string();
        }
        let message = args.split_whitespace().collect::<Vec<_>>().join(" ");
        if message.is_empty() {
            return SENDALL_USAGE.to_string();
        }
        let recipients = match store.distinct_user_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!("Error listing broadcast recipients: {e:?}");
                return BROADCAST_FAILED.to_string();
            }
        };
        if recipients.is_empty() {
            return NO_RECIPIENTS.to_string();
        }
        let report = self.deliver_all(&recipients, &message, outbox).await;
        tracing::info!(
            "Broadcast finished: {} sent, {} failed",
            report.sent,
            report.failed()
        );
        report.to_string()
    }

    /// Sends `text` to every recipient; one failure never stops the rest.
    pub async fn deliver_all(
        &self,
        recipients: &[i64],
        text: &str,
        outbox: &dyn Outbox,
    ) -> BroadcastReport {
        let results = stream::iter(recipients.iter().copied())
            .map(|user_id| async move { (user_id, self.deliver(user_id, text, outbox).await) })
            .buffered(self.concurrency.max(1))
            .collect::<Vec<_>>()
            .await;
        let mut report = BroadcastReport::default();
        for (user_id, res) in results {
            match res {
                Ok(()) => report.sent += 1,
                Err(e) => report.errors.push(format!("Failed to send to {user_id}: {e}")),
            }
        }
        report
    }

    async fn deliver(&self, user_id: i64, text: &str, outbox: &dyn Outbox) -> Result<()> {
        match tokio::time::timeout(self.send_timeout, outbox.send_text(user_id, text)).await {
            Ok(res) => res,
            Err(_) => Err(anyhow!(
                "timed out after {}s",
                self.send_timeout.as_secs()
            )),
        }
    }
}
