use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use shared::catalog::Service;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

const SERVICE_PREFIX: &str = "service_";
const INQUIRE_PREFIX: &str = "inquire_";
const CONFIRM: &str = "confirm";
const CANCEL: &str = "cancel";
const BACK: &str = "back";
const PORTFOLIO: &str = "portfolio";
const ACHIEVEMENTS: &str = "achievements";
const CONTACT: &str = "contact";

const INQUIRE_LABEL: &str = "Inquire about this";
const CONFIRM_LABEL: &str = "Confirm";
const CANCEL_LABEL: &str = "Cancel";
const BACK_LABEL: &str = "Back to Menu";
const PORTFOLIO_LABEL: &str = "View Portfolio";
const ACHIEVEMENTS_LABEL: &str = "Achievements & Certs";
const CONTACT_LABEL: &str = "Contact Me";

/// Everything an inline button can ask the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ServiceSelect(Service),
    Inquire(Service),
    Confirm,
    Cancel,
    Back,
    Portfolio,
    Achievements,
    Contact,
}
impl Action {
    /// Callback data carried by the button.
    pub fn data(&self) -> String {
        match self {
            Action::ServiceSelect(service) => format!("{SERVICE_PREFIX}{service}"),
            Action::Inquire(service) => format!("{INQUIRE_PREFIX}{service}"),
            Action::Confirm => CONFIRM.to_string(),
            Action::Cancel => CANCEL.to_string(),
            Action::Back => BACK.to_string(),
            Action::Portfolio => PORTFOLIO.to_string(),
            Action::Achievements => ACHIEVEMENTS.to_string(),
            Action::Contact => CONTACT.to_string(),
        }
    }
    /// Shared by `/start` and the back button.
    pub fn main_menu_kb() -> InlineKeyboardMarkup {
        let mut kb = InlineKeyboardMarkup::default();
        for service in Service::ALL {
            kb = kb.append_row(vec![Action::ServiceSelect(service).into()]);
        }
        kb.append_row(vec![Action::Portfolio.into()])
            .append_row(vec![Action::Achievements.into()])
            .append_row(vec![Action::Contact.into()])
    }
    pub fn service_kb(service: Service) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::default()
            .append_row(vec![Action::Inquire(service).into(), Action::Back.into()])
    }
    pub fn confirm_kb() -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::default()
            .append_row(vec![Action::Confirm.into(), Action::Cancel.into()])
    }
}
impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Action::ServiceSelect(service) => service.name(),
            Action::Inquire(_) => INQUIRE_LABEL,
            Action::Confirm => CONFIRM_LABEL,
            Action::Cancel => CANCEL_LABEL,
            Action::Back => BACK_LABEL,
            Action::Portfolio => PORTFOLIO_LABEL,
            Action::Achievements => ACHIEVEMENTS_LABEL,
            Action::Contact => CONTACT_LABEL,
        };
        write!(f, "{s}")
    }
}
impl From<Action> for InlineKeyboardButton {
    fn from(value: Action) -> Self {
        InlineKeyboardButton::callback(value.to_string(), value.data())
    }
}
impl FromStr for Action {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(SERVICE_PREFIX) {
            return Ok(Self::ServiceSelect(name.parse()?));
        }
        if let Some(name) = s.strip_prefix(INQUIRE_PREFIX) {
            return Ok(Self::Inquire(name.parse()?));
        }
        match s {
            CONFIRM => Ok(Self::Confirm),
            CANCEL => Ok(Self::Cancel),
            BACK => Ok(Self::Back),
            PORTFOLIO => Ok(Self::Portfolio),
            ACHIEVEMENTS => Ok(Self::Achievements),
            CONTACT => Ok(Self::Contact),
            _ => Err(anyhow!("not an action: {s}")),
        }
    }
}
