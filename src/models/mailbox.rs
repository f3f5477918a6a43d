use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// What the default caller lookup does when nobody matches the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCaller {
    /// Keep processing with no caller.
    #[default]
    Ignore,
    /// Stop processing the message.
    Reject,
}

impl UnknownCaller {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Reject => "reject",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "reject" => Self::Reject,
            _ => Self::Ignore,
        }
    }
}

/// A monitored inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub id: Uuid,
    pub login: String,
    /// Newline-delimited alternate addresses of this inbox.
    pub mail_aliases: String,
    pub unknown_caller: UnknownCaller,
}

fn newline_regex() -> &'static Regex {
    static NEWLINE: OnceLock<Regex> = OnceLock::new();
    NEWLINE.get_or_init(|| Regex::new(r"\r\n|\r|\n").expect("newline pattern is valid"))
}

impl Mailbox {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            login: login.into(),
            mail_aliases: String::new(),
            unknown_caller: UnknownCaller::default(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.mail_aliases = aliases
            .into_iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        self
    }

    /// Alias addresses, one per line of `mail_aliases`. Blank lines are dropped.
    pub fn aliases(&self) -> Vec<&str> {
        if self.mail_aliases.trim().is_empty() {
            return Vec::new();
        }
        newline_regex()
            .split(&self.mail_aliases)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect()
    }
}
