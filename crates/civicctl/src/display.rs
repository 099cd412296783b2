//! Terminal rendering of the conversation

use civic_common::config::ColorMode;
use civic_common::{Actor, Reply};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Whether to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(mode: ColorMode) -> Self {
        let color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        };
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn banner(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// `Bot: ...` / `You: ...` line
    pub fn line(&self, actor: Actor, text: &str) -> String {
        let prefix = format!("{}:", actor);
        if !self.color {
            return format!("{} {}", prefix, text);
        }
        match actor {
            Actor::You => format!("{} {}", prefix.cyan(), text),
            Actor::Bot => format!("{} {}", prefix.green(), text),
        }
    }

    /// Bot line for a reply, colored by kind
    pub fn reply(&self, reply: &Reply) -> Option<String> {
        let text = reply.text()?;
        if !self.color {
            return Some(self.line(Actor::Bot, text));
        }
        let body = match reply {
            Reply::Suggestion { .. } | Reply::NeedYesNo { .. } => text.yellow().to_string(),
            Reply::NotFound { .. } | Reply::SessionClosed { .. } => text.bright_red().to_string(),
            _ => text.to_string(),
        };
        Some(format!("{} {}", "Bot:".green(), body))
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}
