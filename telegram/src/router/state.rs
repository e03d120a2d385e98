use anyhow::Result;
use dptree::case;
use teloxide::{dispatching::DpHandlerDescription, prelude::*};
use tracing::instrument;

use super::or_apologize;
use crate::{Action, MyDialogue, State, state::Step};

pub(super) fn router() -> Handler<'static, Result<()>, DpHandlerDescription> {
    dptree::entry()
        .branch(case![State::AwaitingEmail { draft }].endpoint(text_received))
        .branch(case![State::AwaitingDescription { draft }].endpoint(text_received))
        .branch(case![State::AwaitingConfirmation { draft }].endpoint(text_received))
}

#[instrument(name = "wizard input", skip_all, fields(chat = %msg.chat.id))]
async fn text_received(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    state: State,
) -> Result<()> {
    or_apologize(&bot, msg.chat.id, async {
        match state.on_text(msg.text()) {
            Step::Ignore => {}
            Step::Stay(reminder) => {
                bot.send_message(msg.chat.id, reminder).await?;
            }
            Step::Advance(next) => {
                tracing::debug!("Wizard advanced to {next:?}");
                dialogue.update(next.clone()).await?;
                let Some(prompt) = next.prompt() else {
                    return Ok(());
                };
                let reply = bot.send_message(msg.chat.id, prompt);
                if matches!(next, State::AwaitingConfirmation { .. }) {
                    reply.reply_markup(Action::confirm_kb()).await?;
                } else {
                    reply.await?;
                }
            }
        }
        anyhow::Ok(())
    })
    .await
}
