mod callback;
mod commands;
mod state;

use std::future::Future;

use anyhow::{Error, Result};
use teloxide::{
    dispatching::{DpHandlerDescription, UpdateHandler, dialogue},
    prelude::*,
};

use crate::{Action, State, content, session::SessionStore};

pub fn master() -> UpdateHandler<Error> {
    dialogue::enter::<Update, SessionStore<State>, State, _>()
        .branch(message_router())
        .branch(callback::router())
}
fn message_router() -> Handler<'static, Result<()>, DpHandlerDescription> {
    Update::filter_message()
        .branch(commands::router())
        .branch(state::router())
}

/// Runs a handler body. A failure is logged and the chat gets an apology
/// instead of silence.
async fn or_apologize(
    bot: &Bot,
    chat_id: ChatId,
    body: impl Future<Output = Result<()>>,
) -> Result<()> {
    if let Err(e) = body.await {
        tracing::error!("Handler failed in chat {chat_id}: {e:?}");
        bot.send_message(chat_id, content::APOLOGY).await?;
    }
    Ok(())
}

async fn send_main_menu(bot: &Bot, chat_id: ChatId, text: &str) -> Result<()> {
    bot.send_message(chat_id, text)
        .reply_markup(Action::main_menu_kb())
        .await?;
    Ok(())
}
async fn send_portfolio(bot: &Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, content::PORTFOLIO).await?;
    Ok(())
}
async fn send_achievements(bot: &Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, content::achievements()).await?;
    Ok(())
}
