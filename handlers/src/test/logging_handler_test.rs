//! Unit tests for LoggingHandler.

use relay_core::{Handler, HandlerResponse, MemberStatus};

use super::support::{callback_event, membership_event, text_event};
use crate::LoggingHandler;

#[tokio::test]
async fn test_logging_handler_before_continues_for_every_kind() {
    let h = LoggingHandler;
    for event in [
        text_event("hello"),
        callback_event("100"),
        membership_event(-5, "group", "TeamChat", MemberStatus::Member),
    ] {
        assert!(h.before(&event).await.unwrap());
    }
}

#[tokio::test]
async fn test_logging_handler_after_ok() {
    let h = LoggingHandler;
    let response = HandlerResponse::Reply("hi".to_string());
    assert!(h.after(&text_event("hello"), &response).await.is_ok());
}
