use std::{str::FromStr, sync::Arc};

use anyhow::Result;
use shared::catalog::Service;
use storage::InquiryStore;
use teloxide::{dispatching::DpHandlerDescription, prelude::*};
use tracing::instrument;

use super::{or_apologize, send_achievements, send_main_menu, send_portfolio};
use crate::{
    Action, MyDialogue, State, content,
    state::{self, Author, Submission},
};

pub(super) fn router() -> Handler<'static, Result<()>, DpHandlerDescription> {
    Update::filter_callback_query()
        .branch(
            dptree::filter_map(|q: CallbackQuery| {
                let callback_str = q.data?;
                Action::from_str(&callback_str).ok()
            })
            .endpoint(dispatch),
        )
        .branch(dptree::endpoint(unknown_action))
}

#[instrument(name = "action", skip(bot, q, dialogue, store), fields(chat = %chat_of(&q)))]
async fn dispatch(
    bot: Bot,
    q: CallbackQuery,
    action: Action,
    dialogue: MyDialogue,
    store: Arc<dyn InquiryStore>,
) -> Result<()> {
    let chat_id = chat_of(&q);
    or_apologize(&bot, chat_id, async {
        match action {
            Action::ServiceSelect(service) => service_selected(&bot, &q, service).await,
            Action::Inquire(service) => inquire(&bot, &q, &dialogue, service).await,
            Action::Confirm => confirm(&bot, &q, &dialogue, store.as_ref()).await,
            Action::Cancel => cancel(&bot, &q, &dialogue).await,
            Action::Back => {
                bot.answer_callback_query(q.id.clone()).await?;
                send_main_menu(&bot, chat_id, content::BACK_TO_MENU).await
            }
            Action::Portfolio => {
                bot.answer_callback_query(q.id.clone()).await?;
                send_portfolio(&bot, chat_id).await
            }
            Action::Achievements => {
                bot.answer_callback_query(q.id.clone()).await?;
                send_achievements(&bot, chat_id).await
            }
            Action::Contact => {
                bot.answer_callback_query(q.id.clone()).await?;
                bot.send_message(chat_id, content::CONTACT).await?;
                Ok(())
            }
        }
    })
    .await
}

async fn service_selected(bot: &Bot, q: &CallbackQuery, service: Service) -> Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;
    bot.send_message(chat_of(q), service.details())
        .reply_markup(Action::service_kb(service))
        .await?;
    Ok(())
}

async fn inquire(
    bot: &Bot,
    q: &CallbackQuery,
    dialogue: &MyDialogue,
    service: Service,
) -> Result<()> {
    tracing::info!("Inquiry started for service: {service}");
    let state = State::begin(Some(service));
    dialogue.update(state.clone()).await?;
    bot.answer_callback_query(q.id.clone())
        .text(content::INQUIRY_STARTING)
        .await?;
    if let Some(prompt) = state.prompt() {
        bot.send_message(chat_of(q), prompt).await?;
    }
    Ok(())
}

async fn confirm(
    bot: &Bot,
    q: &CallbackQuery,
    dialogue: &MyDialogue,
    store: &dyn InquiryStore,
) -> Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;
    let chat_id = chat_of(q);
    let author = Author {
        user_id: q.from.id.0.try_into()?,
        username: q.from.username.clone(),
    };
    let reply = match state::confirm(dialogue, &author, store).await? {
        Submission::Saved { id } => {
            tracing::info!("Inquiry stored: {id}");
            content::INQUIRY_SUBMITTED
        }
        Submission::Failed(e) => {
            tracing::error!("Inquiry insert failed: {e:?}");
            content::INQUIRY_SAVE_FAILED
        }
        Submission::Incomplete => content::INQUIRY_MISSING,
    };
    bot.send_message(chat_id, reply).await?;
    Ok(())
}

async fn cancel(bot: &Bot, q: &CallbackQuery, dialogue: &MyDialogue) -> Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;
    tracing::info!("Inquiry canceled, clearing session data");
    state::cancel(dialogue).await?;
    bot.send_message(chat_of(q), content::INQUIRY_CANCELED)
        .await?;
    Ok(())
}

async fn unknown_action(bot: Bot, q: CallbackQuery) -> Result<()> {
    tracing::error!("Unknown callback data: {:?}", q.data);
    bot.answer_callback_query(q.id.clone())
        .text(content::UNKNOWN_ACTION)
        .await?;
    Ok(())
}

/// Chat the pressed button lives in; the presser's private chat otherwise.
fn chat_of(q: &CallbackQuery) -> ChatId {
    q.regular_message()
        .map(|m| m.chat.id)
        .unwrap_or_else(|| ChatId::from(q.from.id))
}
