//! # Handlers for the relay bot
//!
//! Chain handlers: logging, group membership tracking, and the dialog handler that runs the
//! dispatcher and delivers its replies.

mod dialog_handler;
mod logging;
mod membership;

#[cfg(test)]
mod test;

pub use dialog_handler::DialogHandler;
pub use logging::LoggingHandler;
pub use membership::MembershipHandler;
