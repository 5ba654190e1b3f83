//! Weather flow: a single repeatable step asking for a locality.

use providers::WeatherService;
use storage::{Dialog, WeatherStep};
use tracing::warn;

use super::Transition;
use crate::outbound::Outbound;
use crate::texts;

fn await_locality(last_locality: Option<String>) -> Dialog {
    Dialog::Weather(WeatherStep::AwaitLocality { last_locality })
}

pub(super) fn start() -> Transition {
    Transition::to(
        await_locality(None),
        vec![Outbound::text(texts::WEATHER_ASK_LOCALITY)],
    )
}

/// Looks the locality up. Success keeps the dialog open for another locality; an unknown
/// locality is a retry; any other failure ends the dialog.
pub(super) async fn on_locality(
    service: &dyn WeatherService,
    last_locality: &Option<String>,
    text: &str,
) -> Transition {
    let locality = text.trim();
    match service.current_weather(locality).await {
        Ok(reading) => Transition::to(
            await_locality(Some(locality.to_string())),
            vec![
                Outbound::text(texts::weather_reading(locality, &reading)),
                Outbound::text(texts::WEATHER_ASK_ANOTHER_LOCALITY),
            ],
        ),
        Err(e) if e.is_recoverable() => Transition::to(
            await_locality(last_locality.clone()),
            vec![Outbound::text(texts::weather_bad_locality(locality))],
        ),
        Err(e) => {
            warn!(error = %e, locality, "Weather lookup failed; ending dialog");
            Transition::reset(vec![Outbound::text(texts::SERVICE_UNAVAILABLE)])
        }
    }
}
