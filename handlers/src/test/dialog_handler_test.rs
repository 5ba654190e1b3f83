//! Unit tests for DialogHandler: dispatch plus delivery through the Bot.

use std::sync::Arc;

use async_trait::async_trait;
use dialog::engine::Engine;
use dialog::{texts, DialogConfig, Dispatcher};
use providers::{
    ConversionRequest, ConversionResult, CurrencyService, ImageService, ServiceError,
    ServiceResult, WeatherReading, WeatherService,
};
use relay_core::{Button, Handler, HandlerResponse, MemberStatus};
use storage::{GroupChatEntry, GroupRegistry, InMemoryGroupRegistry, InMemorySessionStore};

use super::support::{callback_event, membership_event, text_event, RecordingBot, Sent};
use crate::DialogHandler;

struct Unavailable;

#[async_trait]
impl WeatherService for Unavailable {
    async fn current_weather(&self, _locality: &str) -> ServiceResult<WeatherReading> {
        Err(ServiceError::ServiceUnavailable("down".into()))
    }
}

#[async_trait]
impl CurrencyService for Unavailable {
    async fn convert(&self, _request: &ConversionRequest) -> ServiceResult<ConversionResult> {
        Err(ServiceError::ServiceUnavailable("down".into()))
    }
}

#[async_trait]
impl ImageService for Unavailable {
    async fn random_image(&self, _tag: &str) -> ServiceResult<Vec<u8>> {
        Ok(vec![1, 2, 3])
    }
}

async fn setup(bot: Arc<RecordingBot>) -> DialogHandler {
    let registry = Arc::new(InMemoryGroupRegistry::new());
    registry
        .upsert(GroupChatEntry::new(100, "TeamChat"))
        .await
        .unwrap();
    let engine = Engine::new(
        Arc::new(Unavailable),
        Arc::new(Unavailable),
        Arc::new(Unavailable),
        registry,
        DialogConfig::default(),
    );
    let dispatcher = Dispatcher::new(Arc::new(InMemorySessionStore::new()), engine);
    DialogHandler::new(Arc::new(dispatcher), bot)
}

async fn create_poll(h: &DialogHandler) -> HandlerResponse {
    for event in [
        text_event("/poll"),
        callback_event("100"),
        text_event("Pizza or tacos?"),
        text_event("Pizza"),
        text_event("Tacos"),
    ] {
        h.handle(&event).await.unwrap();
    }
    h.handle(&callback_event("finish")).await.unwrap()
}

#[tokio::test]
async fn test_replies_are_delivered_and_joined() {
    let bot = Arc::new(RecordingBot::default());
    let h = setup(bot.clone()).await;

    let response = h.handle(&text_event("/start")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(format!("{}\n{}", texts::WELCOME, texts::MENU))
    );
    assert_eq!(
        bot.sent(),
        vec![
            Sent::Text(123, texts::WELCOME.to_string()),
            Sent::Text(123, texts::MENU.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_choices_and_images_use_their_channels() {
    let bot = Arc::new(RecordingBot::default());
    let h = setup(bot.clone()).await;

    h.handle(&text_event("/funny")).await.unwrap();
    h.handle(&text_event("/poll")).await.unwrap();

    let sent = bot.sent();
    assert_eq!(sent[1], Sent::Image(123, 3));
    assert_eq!(
        sent[2],
        Sent::Choices(
            123,
            texts::POLL_ASK_GROUP_CHAT.to_string(),
            vec![
                Button::new("TeamChat", "100"),
                Button::new(texts::POLL_NO_DESIRED_CHAT_BTN, "none"),
            ]
        )
    );
}

#[tokio::test]
async fn test_poll_is_sent_to_target_chat() {
    let bot = Arc::new(RecordingBot::default());
    let h = setup(bot.clone()).await;

    let response = create_poll(&h).await;

    assert_eq!(response, HandlerResponse::Reply(texts::POLL_READY.to_string()));
    let sent = bot.sent();
    assert_eq!(
        sent[sent.len() - 2],
        Sent::Poll(
            100,
            "Pizza or tacos?".to_string(),
            vec!["Pizza".to_string(), "Tacos".to_string()]
        )
    );
}

#[tokio::test]
async fn test_failed_poll_submission_reports_unavailable() {
    let bot = Arc::new(RecordingBot::failing_polls());
    let h = setup(bot.clone()).await;

    let response = create_poll(&h).await;

    assert_eq!(
        response,
        HandlerResponse::Reply(texts::SERVICE_UNAVAILABLE.to_string())
    );
    assert_eq!(
        bot.sent().last(),
        Some(&Sent::Text(123, texts::SERVICE_UNAVAILABLE.to_string()))
    );
}

#[tokio::test]
async fn test_dropped_events_stop_without_sending() {
    let bot = Arc::new(RecordingBot::default());
    let h = setup(bot.clone()).await;

    assert_eq!(
        h.handle(&text_event("/cancel")).await.unwrap(),
        HandlerResponse::Stop
    );
    assert_eq!(
        h.handle(&membership_event(100, "group", "TeamChat", MemberStatus::Left))
            .await
            .unwrap(),
        HandlerResponse::Continue
    );
    assert!(bot.sent().is_empty());
}
