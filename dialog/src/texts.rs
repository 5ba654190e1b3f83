//! User-facing strings and templates.

use providers::WeatherReading;

pub const MENU: &str = "Choose an action:\n\
    \x20 /help - show a list of commands\n\
    \n\
    \x20 /weather - get current weather in a locality\n\
    \x20 /currencies - convert currencies\n\
    \x20 /funny - get a funny image with animals\n\
    \x20 /poll - create a poll\n\
    \n\
    \x20 /cancel - cancel a command process";
pub const WELCOME: &str = "Hi!\nI'm a bot for testing purposes. I can inform you about current \
    weather, convert currencies, send funny images of animals and create polls in group chats.";
pub const SERVICE_UNAVAILABLE: &str =
    "Something went wrong. We're working on that. Try again later.";
pub const WAIT_MOMENT: &str = "Sure, wait for a moment...";
pub const DIALOG_IN_PROGRESS: &str =
    "You're in the middle of another command. Finish it or /cancel it first.";

// Weather
pub const WEATHER_ASK_LOCALITY: &str = "Where would you like to know the weather in?";
pub const WEATHER_ASK_ANOTHER_LOCALITY: &str = "Choose another locality or /cancel the command.";

pub fn weather_bad_locality(locality: &str) -> String {
    format!(
        "Locality with name \"{}\" hasn't been found. Try again or /cancel the command.",
        locality
    )
}

pub fn weather_reading(locality: &str, reading: &WeatherReading) -> String {
    format!(
        "Weather in {}:\n  Temperature: {}\n  Pressure: {}\n  Humidity: {}",
        locality, reading.temperature, reading.pressure, reading.humidity
    )
}

// Currencies
pub const CURRENCIES_ASK_FROM: &str = "What currency would you like to convert from?";
pub const CURRENCIES_ASK_TO: &str = "What currency would you like to convert to?";
pub const CURRENCIES_ASK_AMOUNT: &str = "Enter amount for conversion.";
pub const CURRENCIES_BAD_CODE: &str = "Currency should be entered as three latin letters. \
    Try again. For more information: https://en.wikipedia.org/wiki/ISO_4217";
pub const CURRENCIES_BAD_AMOUNT: &str =
    "Amount should be an integer or a fractional number. Try again.";
pub const CURRENCIES_CONVERSION_ERROR: &str =
    "I cannot convert. Please, check the data you've entered.";

pub fn conversion(amount: f64, from: &str, result: f64, to: &str) -> String {
    format!("{:.2} {} = {:.2} {}", amount, from, result, to)
}

// Poll
pub const POLL_NO_GROUP_CHATS: &str = "There are no active group chats I'm included in. \
    Add me to a group chat and try again.";
pub const POLL_NO_DESIRED_CHAT_BTN: &str = "There is no desired chat in the list";
pub const POLL_ASK_GROUP_CHAT: &str = "Choose a group chat where you want to start a poll:";
pub const POLL_NO_DESIRED_CHAT: &str = "If a desired group chat isn't in the list you need to \
    add the bot to the desired group chat. If the bot is in the desired group chat try to \
    remove it from the chat and add it again.";
pub const POLL_ASK_QUESTION: &str = "What question would you like to ask in the poll?";
pub const POLL_ASK_ANSWER: &str = "Enter a possible answer of the poll.";
pub const POLL_ASK_NEXT_ANSWER: &str = "Enter a next possible answer of the poll.";
pub const POLL_ASK_NEXT_ANSWER_OR_FINISH: &str =
    "Enter a next possible answer of the poll or finish creating the poll.";
pub const POLL_FINISH_BTN: &str = "Finish";
pub const POLL_READY: &str = "I've sent the poll to chosen group chat.";

pub fn poll_too_many_answers(max: usize) -> String {
    format!(
        "A poll can't have more than {} answers. Finish creating the poll or /cancel it.",
        max
    )
}
