use anyhow::Result;
use shared::{catalog::Service, models::Inquiry};
use storage::InquiryStore;

use crate::MyDialogue;

/// Recorded as the service when an inquiry starts without one.
pub const UNKNOWN_SERVICE: &str = "Unknown";

const EMAIL_PROMPT: &str = "Please enter your email address:";
const EMAIL_REPROMPT: &str = "Please provide a valid email address.";
const DESCRIPTION_PROMPT: &str = "Please describe your project or requirements:";
const DESCRIPTION_REPROMPT: &str = "Please provide a valid project description.";
const CONFIRMATION_REPROMPT: &str = "Please confirm or cancel your inquiry using the buttons above.";

/// Inquiry fields collected so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub service: String,
    pub email: Option<String>,
    pub description: Option<String>,
}
impl Draft {
    pub fn summary(&self) -> String {
        format!(
            "Confirm your inquiry:\nService: {service}\nEmail: {email}\nDescription: {description}",
            service = self.service,
            email = self.email.as_deref().unwrap_or_default(),
            description = self.description.as_deref().unwrap_or_default(),
        )
    }
}

/// Where a chat is in the inquiry wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    AwaitingEmail {
        draft: Draft,
    },
    AwaitingDescription {
        draft: Draft,
    },
    AwaitingConfirmation {
        draft: Draft,
    },
}

/// Outcome of feeding a message to the wizard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Not collecting anything; the message is not for the wizard.
    Ignore,
    /// Input rejected, the state is unchanged and the user gets the reminder.
    Stay(&'static str),
    Advance(State),
}

impl State {
    /// Starts a fresh wizard run, replacing whatever draft the chat had.
    pub fn begin(pending: Option<Service>) -> State {
        let service = pending
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| UNKNOWN_SERVICE.to_string());
        State::AwaitingEmail {
            draft: Draft {
                service,
                ..Draft::default()
            },
        }
    }
    /// Text to send after entering this state.
    pub fn prompt(&self) -> Option<String> {
        match self {
            State::Idle => None,
            State::AwaitingEmail { .. } => Some(EMAIL_PROMPT.to_string()),
            State::AwaitingDescription { .. } => Some(DESCRIPTION_PROMPT.to_string()),
            State::AwaitingConfirmation { draft } => Some(draft.summary()),
        }
    }
    /// Feeds the text of an incoming message (if it has any) to the wizard.
    pub fn on_text(self, text: Option<&str>) -> Step {
        let text = text.filter(|t| !t.trim().is_empty()).map(str::to_string);
        match (self, text) {
            (State::Idle, _) => Step::Ignore,
            (State::AwaitingEmail { .. }, None) => Step::Stay(EMAIL_REPROMPT),
            (State::AwaitingEmail { mut draft }, Some(email)) => {
                draft.email = Some(email);
                Step::Advance(State::AwaitingDescription { draft })
            }
            (State::AwaitingDescription { .. }, None) => Step::Stay(DESCRIPTION_REPROMPT),
            (State::AwaitingDescription { mut draft }, Some(description)) => {
                draft.description = Some(description);
                Step::Advance(State::AwaitingConfirmation { draft })
            }
            (State::AwaitingConfirmation { .. }, _) => Step::Stay(CONFIRMATION_REPROMPT),
        }
    }
    /// The finished draft, when the wizard is waiting for confirmation and
    /// nothing is missing.
    pub fn ready_draft(&self) -> Option<&Draft> {
        match self {
            State::AwaitingConfirmation { draft }
                if !draft.service.is_empty()
                    && draft.email.is_some()
                    && draft.description.is_some() =>
            {
                Some(draft)
            }
            _ => None,
        }
    }
}

/// Who is confirming the inquiry.
#[derive(Clone, Debug)]
pub struct Author {
    pub user_id: i64,
    pub username: Option<String>,
}

#[derive(Debug)]
pub enum Submission {
    /// Stored; the session can be cleared.
    Saved { id: String },
    /// The store refused it; the draft must be kept for another attempt.
    Failed(anyhow::Error),
    /// Nothing complete to submit, the session has to be reset.
    Incomplete,
}

/// Persists the draft held by `state`, if it is ready.
pub async fn submit(state: &State, author: &Author, store: &dyn InquiryStore) -> Submission {
    let Some(draft) = state.ready_draft() else {
        return Submission::Incomplete;
    };
    let mut builder = Inquiry::builder();
    builder
        .service(draft.service.as_str())
        .email(draft.email.as_deref().unwrap_or_default())
        .description(draft.description.as_deref().unwrap_or_default())
        .user_id(author.user_id);
    if let Some(username) = author.username.as_ref() {
        builder.username(username.as_str());
    }
    let inquiry = match builder.build() {
        Ok(inquiry) => inquiry,
        Err(e) => {
            tracing::error!("Draft could not become an inquiry: {e}");
            return Submission::Incomplete;
        }
    };
    match store.insert_inquiry(&inquiry).await {
        Ok(id) => Submission::Saved { id },
        Err(e) => Submission::Failed(e),
    }
}

impl Submission {
    /// What the session holds once this submission is handled; `None` ends
    /// the wizard run.
    pub fn settle(&self, state: State) -> Option<State> {
        match self {
            Submission::Failed(_) => Some(state),
            Submission::Saved { .. } | Submission::Incomplete => None,
        }
    }
}

/// Submits the draft held by the chat's session and settles the session.
pub async fn confirm(
    dialogue: &MyDialogue,
    author: &Author,
    store: &dyn InquiryStore,
) -> Result<Submission> {
    let state = dialogue.get().await?.unwrap_or_default();
    let submission = submit(&state, author, store).await;
    if matches!(submission, Submission::Incomplete) {
        tracing::error!("Inquiry data missing, state was {state:?}");
    }
    match submission.settle(state) {
        Some(kept) => dialogue.update(kept).await?,
        None => dialogue.exit().await?,
    }
    Ok(submission)
}

/// Drops the chat's draft without saving anything.
pub async fn cancel(dialogue: &MyDialogue) -> Result<()> {
    dialogue.exit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use shared::models::UNKNOWN_USERNAME;
    use teloxide::{dispatching::dialogue::Storage, types::ChatId};

    use super::*;
    use crate::{session::SessionStore, testing::FakeStore};

    fn advance(state: State, text: Option<&str>) -> State {
        match state.on_text(text) {
            Step::Advance(next) => next,
            other => panic!("expected the wizard to advance, got {other:?}"),
        }
    }

    fn author() -> Author {
        Author {
            user_id: 42,
            username: Some("client_42".to_string()),
        }
    }

    #[tokio::test]
    async fn confirmed_run_stores_exactly_what_was_typed() {
        let store = FakeStore::default();
        let state = State::begin(Some(Service::WebDevelopment));
        let state = advance(state, Some("a@b.com"));
        let state = advance(state, Some("Need a site"));

        let Submission::Saved { id } = submit(&state, &author(), &store).await else {
            panic!("inquiry was not saved");
        };
        assert!(!id.is_empty());

        let stored = store.inquiries();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].service, "Web Development");
        assert_eq!(stored[0].email, "a@b.com");
        assert_eq!(stored[0].description, "Need a site");
        assert_eq!(stored[0].user_id, 42);
        assert_eq!(stored[0].username, "client_42");
    }

    #[tokio::test]
    async fn missing_username_is_stored_as_sentinel() {
        let store = FakeStore::default();
        let state = State::begin(Some(Service::AiAutomation));
        let state = advance(advance(state, Some("x@y.z")), Some("Automate invoices"));
        let author = Author {
            user_id: 7,
            username: None,
        };
        assert!(matches!(
            submit(&state, &author, &store).await,
            Submission::Saved { .. }
        ));
        assert_eq!(store.inquiries()[0].username, UNKNOWN_USERNAME);
    }

    #[test]
    fn begin_without_service_uses_sentinel() {
        let State::AwaitingEmail { draft } = State::begin(None) else {
            panic!("wizard did not start");
        };
        assert_eq!(draft.service, UNKNOWN_SERVICE);
        assert_eq!(draft.email, None);
    }

    #[test]
    fn begin_replaces_previous_draft() {
        let old = advance(State::begin(Some(Service::UiUxDesign)), Some("old@mail"));
        assert!(matches!(old, State::AwaitingDescription { .. }));
        let fresh = State::begin(Some(Service::AiAutomation));
        assert_eq!(
            fresh,
            State::AwaitingEmail {
                draft: Draft {
                    service: "AI Automation".to_string(),
                    email: None,
                    description: None,
                }
            }
        );
    }

    #[test]
    fn non_text_input_never_advances() {
        let at_email = State::begin(Some(Service::WebDevelopment));
        assert_eq!(at_email.clone().on_text(None), Step::Stay(EMAIL_REPROMPT));
        assert_eq!(at_email.clone().on_text(Some("   ")), Step::Stay(EMAIL_REPROMPT));

        let at_description = advance(at_email, Some("a@b.com"));
        assert_eq!(
            at_description.clone().on_text(None),
            Step::Stay(DESCRIPTION_REPROMPT)
        );
        let State::AwaitingDescription { draft } = at_description else {
            panic!("wrong state");
        };
        assert_eq!(draft.description, None);
    }

    #[test]
    fn email_is_taken_verbatim() {
        let state = advance(State::begin(Some(Service::WebDevelopment)), Some("not an email"));
        let State::AwaitingDescription { draft } = state else {
            panic!("wrong state");
        };
        assert_eq!(draft.email.as_deref(), Some("not an email"));
    }

    #[test]
    fn text_while_idle_or_confirming_is_not_consumed() {
        assert_eq!(State::Idle.on_text(Some("hello")), Step::Ignore);
        let confirming = advance(
            advance(State::begin(Some(Service::WebDevelopment)), Some("a@b.com")),
            Some("Need a site"),
        );
        assert_eq!(
            confirming.on_text(Some("one more thing")),
            Step::Stay(CONFIRMATION_REPROMPT)
        );
    }

    #[test]
    fn summary_lists_collected_fields() {
        let state = advance(
            advance(State::begin(Some(Service::WebDevelopment)), Some("a@b.com")),
            Some("Need a site"),
        );
        assert_eq!(
            state.prompt().unwrap(),
            "Confirm your inquiry:\nService: Web Development\nEmail: a@b.com\nDescription: Need a site"
        );
    }

    #[tokio::test]
    async fn submit_without_complete_draft_is_incomplete() {
        let store = FakeStore::default();
        for state in [
            State::Idle,
            State::begin(Some(Service::WebDevelopment)),
            State::AwaitingConfirmation {
                draft: Draft::default(),
            },
        ] {
            assert!(matches!(
                submit(&state, &author(), &store).await,
                Submission::Incomplete
            ));
        }
        assert!(store.inquiries().is_empty());
    }

    #[tokio::test]
    async fn failed_insert_reports_failure() {
        let store = FakeStore::failing();
        let state = advance(
            advance(State::begin(Some(Service::WebDevelopment)), Some("a@b.com")),
            Some("Need a site"),
        );
        assert!(matches!(
            submit(&state, &author(), &store).await,
            Submission::Failed(_)
        ));
        assert!(store.inquiries().is_empty());
    }

    fn session() -> (Arc<SessionStore<State>>, MyDialogue) {
        let sessions = SessionStore::new(Duration::from_secs(600));
        let dialogue = MyDialogue::new(sessions.clone(), ChatId(42));
        (sessions, dialogue)
    }

    fn confirming() -> State {
        advance(
            advance(State::begin(Some(Service::WebDevelopment)), Some("a@b.com")),
            Some("Need a site"),
        )
    }

    #[tokio::test]
    async fn saved_inquiry_leaves_session_idle() {
        let (sessions, dialogue) = session();
        dialogue.update(confirming()).await.unwrap();
        let store = FakeStore::default();

        let submission = confirm(&dialogue, &author(), &store).await.unwrap();
        assert!(matches!(submission, Submission::Saved { .. }));
        assert_eq!(sessions.get_dialogue(ChatId(42)).await.unwrap(), None);
        assert_eq!(store.inquiries().len(), 1);
    }

    #[tokio::test]
    async fn failed_insert_keeps_draft_in_session() {
        let (sessions, dialogue) = session();
        dialogue.update(confirming()).await.unwrap();
        let store = FakeStore::failing();

        let submission = confirm(&dialogue, &author(), &store).await.unwrap();
        assert!(matches!(submission, Submission::Failed(_)));
        assert_eq!(
            sessions.get_dialogue(ChatId(42)).await.unwrap(),
            Some(confirming())
        );
    }

    #[tokio::test]
    async fn incomplete_draft_resets_session() {
        let (sessions, dialogue) = session();
        dialogue
            .update(State::AwaitingConfirmation {
                draft: Draft::default(),
            })
            .await
            .unwrap();
        let store = FakeStore::default();

        let submission = confirm(&dialogue, &author(), &store).await.unwrap();
        assert!(matches!(submission, Submission::Incomplete));
        assert_eq!(sessions.get_dialogue(ChatId(42)).await.unwrap(), None);
        assert!(store.inquiries().is_empty());
    }

    #[tokio::test]
    async fn confirm_without_session_saves_nothing() {
        let (sessions, dialogue) = session();
        let store = FakeStore::default();

        let submission = confirm(&dialogue, &author(), &store).await.unwrap();
        assert!(matches!(submission, Submission::Incomplete));
        assert_eq!(sessions.get_dialogue(ChatId(42)).await.unwrap(), None);
        assert_eq!(store.queries(), 0);
    }

    #[tokio::test]
    async fn canceled_run_saves_nothing_and_clears_session() {
        let (sessions, dialogue) = session();
        dialogue.update(confirming()).await.unwrap();
        let store = FakeStore::default();

        cancel(&dialogue).await.unwrap();
        assert_eq!(sessions.get_dialogue(ChatId(42)).await.unwrap(), None);
        assert!(store.inquiries().is_empty());
        assert_eq!(store.queries(), 0);
    }
}
