mod group_chat;
mod session;

pub use group_chat::GroupChatEntry;
pub use session::{CurrencyStep, Dialog, Flow, PollStep, Session, SessionKey, WeatherStep};
