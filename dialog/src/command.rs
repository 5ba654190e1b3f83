//! Slash commands understood by the bot.

/// A recognised command. Anything else starting with `/` is ordinary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Weather,
    Currencies,
    Funny,
    Poll,
    Cancel,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Command; 7] = [
        Command::Start,
        Command::Help,
        Command::Weather,
        Command::Currencies,
        Command::Funny,
        Command::Poll,
        Command::Cancel,
    ];

    /// Parses the first word of `text`. `/weather@SomeBot` is `/weather`; trailing words are ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        Command::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Name without the leading slash.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Weather => "weather",
            Command::Currencies => "currencies",
            Command::Funny => "funny",
            Command::Poll => "poll",
            Command::Cancel => "cancel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Start => "start the bot",
            Command::Help => "show a list of commands",
            Command::Weather => "get current weather in a locality",
            Command::Currencies => "convert currencies",
            Command::Funny => "get a funny image with animals",
            Command::Poll => "create a poll",
            Command::Cancel => "cancel a command process",
        }
    }

    /// True for commands that begin something and are therefore refused while a dialog is active.
    pub fn starts_dialog(&self) -> bool {
        matches!(
            self,
            Command::Weather | Command::Currencies | Command::Funny | Command::Poll
        )
    }
}
