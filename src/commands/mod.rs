//! Built-in bot commands and the catalog shown by `/help`.


use crate::i18n::t;
use camscout_core::message::BotCommand;

/// One entry of the help listing.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Slash command, or a translation key for a natural-language trigger.
    pub name: &'static str,
    /// Translation key of the description.
    pub description: &'static str,
    /// `true` for slash commands shown verbatim.
    pub literal: bool,
}

/// Every command in display order.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "/help",
        description: "help_cmd",
        literal: true,
    },
    CatalogEntry {
        name: "/info",
        description: "info_cmd",
        literal: true,
    },
    CatalogEntry {
        name: "/start",
        description: "start_cmd",
        literal: true,
    },
    CatalogEntry {
        name: "send_geo",
        description: "send_geo_cmd",
        literal: false,
    },
];

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Info,
    Help,
    Unknown,
}

impl Command {
    /// Parse message text for a user whose language is `lang`.
    ///
    /// Slash commands may carry an `@botname` suffix. Keyboard buttons send
    /// their localized label, so those are matched against `lang`'s labels.
    pub fn parse(text: &str, lang: &str) -> Self {
        let text = text.trim();

        if text == t("info_cmd", lang) {
            return Self::Info;
        }
        if text == t("help_cmd", lang) {
            return Self::Help;
        }

        let Some(first) = text.split_whitespace().next() else {
            return Self::Unknown;
        };
        // "/help@camscout_bot" → "/help".
        let cmd = first.split('@').next().unwrap_or(first);
        match cmd {
            "/start" => Self::Start,
            "/info" => Self::Info,
            "/help" => Self::Help,
            _ => Self::Unknown,
        }
    }
}

/// One `"<name> - <description>\n"` line per catalog entry.
pub fn render_command_list(lang: &str) -> String {
    CATALOG
        .iter()
        .map(|entry| {
            let name = if entry.literal {
                entry.name
            } else {
                t(entry.name, lang)
            };
            format!("{name} - {}\n", t(entry.description, lang))
        })
        .collect()
}

/// Reply keyboard offered by `/start`: info and help buttons on one row.
pub fn start_keyboard(lang: &str) -> Vec<Vec<String>> {
    vec![vec![
        t("info_cmd", lang).to_string(),
        t("help_cmd", lang).to_string(),
    ]]
}

/// Slash commands for the client's command menu.
pub fn command_menu(lang: &str) -> Vec<BotCommand> {
    CATALOG
        .iter()
        .filter(|entry| entry.literal)
        .map(|entry| BotCommand {
            command: entry.name.trim_start_matches('/').to_string(),
            description: t(entry.description, lang).to_string(),
        })
        .collect()
}
