use teloxide::utils::command::BotCommands;

/// These commands are supported:
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Show the main menu
    Start,
    /// Show this help
    Help,
    /// Link to the portfolio website
    Portfolio,
    /// Achievements and certifications
    Achievements,
    /// (admin) Message one user: /sendmsg <userId> <message>
    SendMsg(String),
    /// (admin) Message every user with an inquiry: /sendall <message>
    SendAll(String),
}
impl Command {
    /// Reply to `/help`.
    pub fn help_text() -> String {
        Command::descriptions().to_string()
    }
}
