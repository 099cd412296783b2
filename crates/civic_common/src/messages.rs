//! Fixed phrases shown to citizens.
//!
//! Everything the bot says that is not a canned FAQ answer lives here so
//! the session logic and the front end agree on wording.

/// Title shown on the login screen
pub const WELCOME_BANNER: &str = "Welcome to the City Chatbot";

/// Prompt for the citizen identifier
pub const LOGIN_PROMPT: &str = "Enter your Citizen ID";

pub const DECLINED: &str = "Okay, please ask your question again.";

pub const NEED_YES_NO: &str = "Please reply with 'yes' or 'no'.";

pub const SESSION_CLOSED: &str = "This session has ended. Please log in again.";

/// Word that ends a session from any state
pub const EXIT_WORD: &str = "exit";
pub const YES_WORD: &str = "yes";
pub const NO_WORD: &str = "no";

/// Greeting shown after a successful login
pub fn chat_greeting(name: &str) -> String {
    format!("Hello {}, ask your question below:", name)
}

/// Direct answer, personalised
pub fn greeted_answer(name: &str, answer: &str) -> String {
    format!("Hello {}, {}", name, answer)
}

pub fn suggestion(keyword: &str) -> String {
    format!("Did you mean '{}'? (yes/no)", keyword)
}

pub fn not_found(name: &str) -> String {
    format!("Hello {}, I couldn't find information about your question.", name)
}

pub fn farewell(name: &str) -> String {
    format!("Thank you, {}, for using the chatbot.", name)
}
