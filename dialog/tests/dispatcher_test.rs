//! Integration tests for the Dispatcher with in-memory stores and fake providers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dialog::engine::Engine;
use dialog::{texts, DialogConfig, Dispatcher, Outbound, PollRequest};
use providers::{
    ConversionRequest, ConversionResult, CurrencyService, ImageService, Measurement,
    ServiceError, ServiceResult, WeatherReading, WeatherService,
};
use relay_core::{Button, Callback, Chat, Event, Message, User};
use storage::{
    Dialog, GroupChatEntry, GroupRegistry, InMemoryGroupRegistry, InMemorySessionStore, PollStep,
    SessionKey, SessionStore, WeatherStep,
};
use tokio::sync::Barrier;

const CHAT: i64 = 555;
const USER: i64 = 42;

fn reading() -> WeatherReading {
    WeatherReading {
        temperature: Measurement { value: 280.32, unit: "K" },
        pressure: Measurement { value: 1012.0, unit: "hPa" },
        humidity: Measurement { value: 81.0, unit: "%" },
    }
}

/// Answers by locality: "Atlantis" is unknown, "Down" is unavailable, anything else succeeds.
/// With a barrier, every call waits until all racing callers have arrived.
struct FakeWeather {
    barrier: Option<Barrier>,
}

impl FakeWeather {
    fn new() -> Self {
        Self { barrier: None }
    }

    fn racing(callers: usize) -> Self {
        Self {
            barrier: Some(Barrier::new(callers)),
        }
    }
}

#[async_trait]
impl WeatherService for FakeWeather {
    async fn current_weather(&self, locality: &str) -> ServiceResult<WeatherReading> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        match locality {
            "Atlantis" => Err(ServiceError::InvalidInput("city not found".into())),
            "Down" => Err(ServiceError::ServiceUnavailable("timeout".into())),
            _ => Ok(reading()),
        }
    }
}

/// Knows USD to EUR only; other pairs are rejected as the provider would. "DEN" is a bad key.
struct FakeCurrency;

#[async_trait]
impl CurrencyService for FakeCurrency {
    async fn convert(&self, request: &ConversionRequest) -> ServiceResult<ConversionResult> {
        match (request.from.as_str(), request.to.as_str()) {
            ("USD", "EUR") => Ok(ConversionResult {
                converted_amount: request.amount * 0.5,
            }),
            (_, "DEN") => Err(ServiceError::AccessDenied("Invalid key".into())),
            _ => Err(ServiceError::InvalidInput("invalid \"to\" property".into())),
        }
    }
}

struct FakeImages {
    fail: bool,
}

#[async_trait]
impl ImageService for FakeImages {
    async fn random_image(&self, tag: &str) -> ServiceResult<Vec<u8>> {
        assert_eq!(tag, "funny animals");
        if self.fail {
            Err(ServiceError::ServiceUnavailable("down".into()))
        } else {
            Ok(b"GIF89a".to_vec())
        }
    }
}

struct Harness {
    dispatcher: Arc<Dispatcher>,
    sessions: Arc<InMemorySessionStore>,
    registry: Arc<InMemoryGroupRegistry>,
}

fn harness_with(weather: FakeWeather, images_fail: bool) -> Harness {
    let sessions = Arc::new(InMemorySessionStore::new());
    let registry = Arc::new(InMemoryGroupRegistry::new());
    let engine = Engine::new(
        Arc::new(weather),
        Arc::new(FakeCurrency),
        Arc::new(FakeImages { fail: images_fail }),
        registry.clone(),
        DialogConfig::default(),
    );
    Harness {
        dispatcher: Arc::new(Dispatcher::new(sessions.clone(), engine)),
        sessions,
        registry,
    }
}

fn harness() -> Harness {
    harness_with(FakeWeather::new(), false)
}

fn user() -> User {
    User {
        id: USER,
        username: Some("tester".to_string()),
        first_name: None,
        last_name: None,
    }
}

fn private_chat() -> Chat {
    Chat {
        id: CHAT,
        chat_type: "private".to_string(),
    }
}

fn text(body: &str) -> Event {
    Event::Message(Message {
        id: "1".to_string(),
        user: user(),
        chat: private_chat(),
        text: Some(body.to_string()),
        created_at: Utc::now(),
    })
}

fn press(value: &str) -> Event {
    Event::Callback(Callback {
        id: "cb".to_string(),
        user: user(),
        chat: private_chat(),
        data: Some(value.to_string()),
    })
}

fn texts_of(replies: &[Outbound]) -> Vec<&str> {
    replies.iter().filter_map(Outbound::as_text).collect()
}

impl Harness {
    async fn send(&self, event: Event) -> Vec<Outbound> {
        self.dispatcher.dispatch(&event).await.unwrap()
    }

    async fn dialog(&self) -> Dialog {
        self.sessions
            .load(&SessionKey::new(CHAT, USER))
            .await
            .unwrap()
            .dialog
    }

    async fn version(&self) -> u64 {
        self.sessions
            .load(&SessionKey::new(CHAT, USER))
            .await
            .unwrap()
            .version
    }
}

/// **Test: poll flow end to end submits the collected draft and resets.**
#[tokio::test]
async fn test_poll_flow_end_to_end() {
    let h = harness();
    h.registry
        .upsert(GroupChatEntry::new(100, "TeamChat"))
        .await
        .unwrap();

    let offer = h.send(text("/poll")).await;
    assert_eq!(
        offer,
        vec![Outbound::choices(
            texts::POLL_ASK_GROUP_CHAT,
            vec![
                Button::new("TeamChat", "100"),
                Button::new(texts::POLL_NO_DESIRED_CHAT_BTN, "none"),
            ]
        )]
    );

    assert_eq!(
        texts_of(&h.send(press("100")).await),
        vec![texts::POLL_ASK_QUESTION]
    );
    assert_eq!(
        texts_of(&h.send(text("Pizza or tacos?")).await),
        vec![texts::POLL_ASK_ANSWER]
    );
    assert_eq!(
        texts_of(&h.send(text("Pizza")).await),
        vec![texts::POLL_ASK_NEXT_ANSWER]
    );
    assert_eq!(
        texts_of(&h.send(text("Tacos")).await),
        vec![texts::POLL_ASK_NEXT_ANSWER_OR_FINISH]
    );

    let finished = h.send(press("finish")).await;
    assert_eq!(
        finished,
        vec![
            Outbound::Poll(PollRequest {
                target_chat_id: 100,
                question: "Pizza or tacos?".to_string(),
                answers: vec!["Pizza".to_string(), "Tacos".to_string()],
            }),
            Outbound::text(texts::POLL_READY),
        ]
    );
    assert!(h.dialog().await.is_idle());
}

/// **Test: poll start is refused while no group chat is registered.**
#[tokio::test]
async fn test_poll_requires_registered_chats() {
    let h = harness();
    let replies = h.send(text("/poll")).await;
    assert_eq!(texts_of(&replies), vec![texts::POLL_NO_GROUP_CHATS]);
    assert!(h.dialog().await.is_idle());
    assert_eq!(h.version().await, 0);
}

/// **Test: "none" aborts with an explanation; an unregistered chat id re-offers the list.**
#[tokio::test]
async fn test_poll_group_chat_selection() {
    let h = harness();
    h.registry
        .upsert(GroupChatEntry::new(100, "TeamChat"))
        .await
        .unwrap();

    h.send(text("/poll")).await;
    let retry = h.send(press("999")).await;
    assert_eq!(texts_of(&retry), vec![texts::POLL_ASK_GROUP_CHAT]);
    assert_eq!(h.dialog().await, Dialog::Poll(PollStep::AwaitGroupChat));

    // Typed text is noise at this step.
    assert!(h.send(text("TeamChat")).await.is_empty());

    let aborted = h.send(press("none")).await;
    assert_eq!(texts_of(&aborted), vec![texts::POLL_NO_DESIRED_CHAT]);
    assert!(h.dialog().await.is_idle());
}

/// **Test: after a weather lookup the dialog stays open for the next locality.**
#[tokio::test]
async fn test_weather_loop_stays_in_await_locality() {
    let h = harness();
    assert_eq!(
        texts_of(&h.send(text("/weather")).await),
        vec![texts::WEATHER_ASK_LOCALITY]
    );

    let first = h.send(text("London")).await;
    assert_eq!(
        texts_of(&first),
        vec![
            texts::weather_reading("London", &reading()).as_str(),
            texts::WEATHER_ASK_ANOTHER_LOCALITY,
        ]
    );
    assert_eq!(
        h.dialog().await,
        Dialog::Weather(WeatherStep::AwaitLocality {
            last_locality: Some("London".to_string())
        })
    );

    let second = h.send(text("Paris")).await;
    assert_eq!(texts_of(&second)[0], texts::weather_reading("Paris", &reading()));

    let unknown = h.send(text("Atlantis")).await;
    assert_eq!(
        texts_of(&unknown),
        vec![texts::weather_bad_locality("Atlantis").as_str()]
    );
    assert!(!h.dialog().await.is_idle());

    let down = h.send(text("Down")).await;
    assert_eq!(texts_of(&down), vec![texts::SERVICE_UNAVAILABLE]);
    assert!(h.dialog().await.is_idle());
}

/// **Test: currency flow validates each step and resets after the conversion.**
#[tokio::test]
async fn test_currency_flow() {
    let h = harness();
    h.send(text("/currencies")).await;

    assert_eq!(
        texts_of(&h.send(text("dollars")).await),
        vec![texts::CURRENCIES_BAD_CODE]
    );
    assert_eq!(
        texts_of(&h.send(text("usd")).await),
        vec![texts::CURRENCIES_ASK_TO]
    );
    assert_eq!(
        texts_of(&h.send(text("eur")).await),
        vec![texts::CURRENCIES_ASK_AMOUNT]
    );
    assert_eq!(
        texts_of(&h.send(text("lots")).await),
        vec![texts::CURRENCIES_BAD_AMOUNT]
    );
    assert_eq!(
        texts_of(&h.send(text("10")).await),
        vec!["10.00 USD = 5.00 EUR"]
    );
    assert!(h.dialog().await.is_idle());
}

/// **Test: provider rejections end the currency dialog with the matching message.**
#[tokio::test]
async fn test_currency_failures_reset() {
    let h = harness();
    for (to, expected) in [
        ("QQQ", texts::CURRENCIES_CONVERSION_ERROR),
        ("DEN", texts::SERVICE_UNAVAILABLE),
    ] {
        h.send(text("/currencies")).await;
        h.send(text("USD")).await;
        h.send(text(to)).await;
        assert_eq!(texts_of(&h.send(text("1")).await), vec![expected]);
        assert!(h.dialog().await.is_idle());
    }
}

/// **Test: cancel while idle replies nothing and writes nothing.**
#[tokio::test]
async fn test_cancel_when_idle_is_noop() {
    let h = harness();
    assert!(h.send(text("/cancel")).await.is_empty());
    assert_eq!(h.version().await, 0);

    h.send(text("/weather")).await;
    let version = h.version().await;
    assert_eq!(
        texts_of(&h.send(text("/cancel")).await),
        vec![texts::MENU]
    );
    assert!(h.dialog().await.is_idle());
    assert_eq!(h.version().await, version + 1);

    assert!(h.send(text("/cancel@RelayBot")).await.is_empty());
    assert_eq!(h.version().await, version + 1);
}

/// **Test: a start command during another dialog is refused and changes nothing.**
#[tokio::test]
async fn test_start_command_during_dialog_is_refused() {
    let h = harness();
    h.send(text("/currencies")).await;
    let version = h.version().await;

    let replies = h.send(text("/weather")).await;
    assert_eq!(texts_of(&replies), vec![texts::DIALOG_IN_PROGRESS]);
    assert_eq!(h.version().await, version);

    // /help is answered whatever the state.
    assert_eq!(texts_of(&h.send(text("/help")).await), vec![texts::MENU]);
    assert_eq!(h.version().await, version);
}

/// **Test: /start greets; /funny replies with the image or the unavailable text.**
#[tokio::test]
async fn test_stateless_commands() {
    let h = harness();
    assert_eq!(
        texts_of(&h.send(text("/start")).await),
        vec![texts::WELCOME, texts::MENU]
    );

    assert_eq!(
        h.send(text("/funny")).await,
        vec![
            Outbound::text(texts::WAIT_MOMENT),
            Outbound::Image(b"GIF89a".to_vec()),
        ]
    );
    assert!(h.dialog().await.is_idle());

    let failing = harness_with(FakeWeather::new(), true);
    assert_eq!(
        texts_of(&failing.send(text("/funny")).await),
        vec![texts::WAIT_MOMENT, texts::SERVICE_UNAVAILABLE]
    );
}

/// **Test: idle text, stray callbacks and non-text messages are dropped.**
#[tokio::test]
async fn test_out_of_band_events_are_dropped() {
    let h = harness();
    assert!(h.send(text("hello")).await.is_empty());
    assert!(h.send(press("finish")).await.is_empty());

    let sticker = Event::Message(Message {
        id: "2".to_string(),
        user: user(),
        chat: private_chat(),
        text: None,
        created_at: Utc::now(),
    });
    assert!(h.send(sticker).await.is_empty());
    assert_eq!(h.version().await, 0);
}

/// **Test: two events racing on the same version; exactly one transition is applied.**
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_events_single_transition() {
    let h = harness_with(FakeWeather::racing(2), false);
    h.send(text("/weather")).await;
    let version = h.version().await;

    let a = {
        let dispatcher = h.dispatcher.clone();
        tokio::spawn(async move { dispatcher.dispatch(&text("London")).await })
    };
    let b = {
        let dispatcher = h.dispatcher.clone();
        tokio::spawn(async move { dispatcher.dispatch(&text("Paris")).await })
    };
    let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());

    // Both lookups ran against the same version; only one reply survives.
    assert_eq!([a.is_empty(), b.is_empty()].iter().filter(|e| **e).count(), 1);
    assert_eq!(h.version().await, version + 1);

    let winner = if a.is_empty() { "Paris" } else { "London" };
    assert_eq!(
        h.dialog().await,
        Dialog::Weather(WeatherStep::AwaitLocality {
            last_locality: Some(winner.to_string())
        })
    );
}
