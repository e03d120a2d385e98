use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;

const AI_AUTOMATION: &str = "AI Automation";
const CHATBOT_DEVELOPMENT: &str = "Chatbot Development";
const WEB_DEVELOPMENT: &str = "Web Development";
const UI_UX_DESIGN: &str = "UI/UX Design";
const WORKFLOW_AUTOMATION: &str = "Workflow Automation";

/// Services offered through the bot, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    AiAutomation,
    ChatbotDevelopment,
    WebDevelopment,
    UiUxDesign,
    WorkflowAutomation,
}
impl Service {
    pub const ALL: [Service; 5] = [
        Service::AiAutomation,
        Service::ChatbotDevelopment,
        Service::WebDevelopment,
        Service::UiUxDesign,
        Service::WorkflowAutomation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Service::AiAutomation => AI_AUTOMATION,
            Service::ChatbotDevelopment => CHATBOT_DEVELOPMENT,
            Service::WebDevelopment => WEB_DEVELOPMENT,
            Service::UiUxDesign => UI_UX_DESIGN,
            Service::WorkflowAutomation => WORKFLOW_AUTOMATION,
        }
    }
    pub fn description(&self) -> &'static str {
        match self {
            Service::AiAutomation => {
                "AI Automation Solutions: Building intelligent systems to automate tasks using ML and AI technologies."
            }
            Service::ChatbotDevelopment => {
                "Chatbot & Bot Development: Custom bots for Telegram, web, and more, like this one!"
            }
            Service::WebDevelopment => {
                "Web Development (Frontend & Full-stack): Creating responsive websites with React.js, Node.js, and more."
            }
            Service::UiUxDesign => {
                "UI/UX Design Services: Designing intuitive interfaces for apps and websites."
            }
            Service::WorkflowAutomation => {
                "Workflow Automation & Integration: Streamlining processes with tools like MongoDB, AWS, and GitHub Actions."
            }
        }
    }
    pub fn related_projects(&self) -> &'static [&'static str] {
        match self {
            Service::AiAutomation => &["Smart Outfit Recommendation System (ML-based)"],
            Service::ChatbotDevelopment => &["ChitChat (Real-time Chat App)"],
            Service::WebDevelopment => &[
                "Pop Crat (Fashion E-commerce Platform)",
                "Portfolio Website",
            ],
            Service::UiUxDesign => &[
                "Perpetual (Trading Platform UI/UX)",
                "Food Delivery App UI/UX",
            ],
            Service::WorkflowAutomation => &["Vajra (Medical Emergency Platform)"],
        }
    }
    /// Detail card shown when the service is picked from the menu.
    pub fn details(&self) -> String {
        format!(
            "{name}: {description}\n\nRelated Projects:\n- {projects}",
            name = self.name(),
            description = self.description(),
            projects = self.related_projects().join("\n- "),
        )
    }
}
impl Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for Service {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.name() == s)
            .ok_or(anyhow!("unknown service: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for service in Service::ALL {
            assert_eq!(service.name().parse::<Service>().unwrap(), service);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("Blockchain".parse::<Service>().is_err());
        assert!("web development".parse::<Service>().is_err());
    }

    #[test]
    fn details_list_every_related_project() {
        let text = Service::WebDevelopment.details();
        assert_eq!(
            text,
            "Web Development: Web Development (Frontend & Full-stack): Creating responsive websites with React.js, Node.js, and more.\n\nRelated Projects:\n- Pop Crat (Fashion E-commerce Platform)\n- Portfolio Website"
        );
    }

    #[test]
    fn every_service_has_projects() {
        for service in Service::ALL {
            assert!(!service.related_projects().is_empty());
        }
    }
}
