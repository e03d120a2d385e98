use std::sync::Arc;

use anyhow::{Result, anyhow};
use dptree::case;
use storage::InquiryStore;
use teloxide::{dispatching::DpHandlerDescription, prelude::*};
use tracing::instrument;

use super::{or_apologize, send_achievements, send_main_menu, send_portfolio};
use crate::{Command, MyDialogue, admin::Admin, content};

pub(super) fn router() -> Handler<'static, Result<()>, DpHandlerDescription> {
    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Portfolio].endpoint(portfolio))
        .branch(case![Command::Achievements].endpoint(achievements))
        .branch(case![Command::SendMsg(args)].endpoint(send_msg))
        .branch(case![Command::SendAll(args)].endpoint(send_all))
}

/// `/start` also drops any wizard run in progress.
#[instrument(name = "start", skip_all, fields(chat = %msg.chat.id))]
async fn start(bot: Bot, msg: Message, dialogue: MyDialogue) -> Result<()> {
    or_apologize(&bot, msg.chat.id, async {
        dialogue.exit().await?;
        send_main_menu(&bot, msg.chat.id, content::INTRO).await
    })
    .await
}
async fn help(bot: Bot, msg: Message) -> Result<()> {
    or_apologize(&bot, msg.chat.id, async {
        bot.send_message(msg.chat.id, Command::help_text()).await?;
        anyhow::Ok(())
    })
    .await
}
async fn portfolio(bot: Bot, msg: Message) -> Result<()> {
    or_apologize(&bot, msg.chat.id, send_portfolio(&bot, msg.chat.id)).await
}
async fn achievements(bot: Bot, msg: Message) -> Result<()> {
    or_apologize(&bot, msg.chat.id, send_achievements(&bot, msg.chat.id)).await
}

#[instrument(name = "sendmsg", skip_all, fields(chat = %msg.chat.id))]
async fn send_msg(
    bot: Bot,
    msg: Message,
    args: String,
    admin: Admin,
    store: Arc<dyn InquiryStore>,
) -> Result<()> {
    or_apologize(&bot, msg.chat.id, async {
        let caller = caller_id(&msg)?;
        let reply = admin
            .send_to_user(caller, &args, store.as_ref(), &bot)
            .await;
        bot.send_message(msg.chat.id, reply).await?;
        anyhow::Ok(())
    })
    .await
}

#[instrument(name = "sendall", skip_all, fields(chat = %msg.chat.id))]
async fn send_all(
    bot: Bot,
    msg: Message,
    args: String,
    admin: Admin,
    store: Arc<dyn InquiryStore>,
) -> Result<()> {
    or_apologize(&bot, msg.chat.id, async {
        let caller = caller_id(&msg)?;
        let reply = admin.broadcast(caller, &args, store.as_ref(), &bot).await;
        bot.send_message(msg.chat.id, reply).await?;
        anyhow::Ok(())
    })
    .await
}

fn caller_id(msg: &Message) -> Result<i64> {
    let from = msg
        .from
        .as_ref()
        .ok_or(anyhow!("no field 'from' on message"))?;
    Ok(from.id.0.try_into()?)
}
