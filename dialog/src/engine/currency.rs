//! Currency flow: from code, to code, amount, then one conversion.

use providers::{ConversionRequest, CurrencyCode, CurrencyService, ServiceError};
use storage::{CurrencyStep, Dialog};
use tracing::warn;

use super::Transition;
use crate::outbound::Outbound;
use crate::texts;

pub(super) fn start() -> Transition {
    Transition::to(
        Dialog::Currency(CurrencyStep::AwaitFrom),
        vec![Outbound::text(texts::CURRENCIES_ASK_FROM)],
    )
}

pub(super) fn on_from(text: &str) -> Transition {
    match CurrencyCode::parse(text) {
        Some(from) => Transition::to(
            Dialog::Currency(CurrencyStep::AwaitTo {
                from: from.as_str().to_string(),
            }),
            vec![Outbound::text(texts::CURRENCIES_ASK_TO)],
        ),
        None => Transition::to(
            Dialog::Currency(CurrencyStep::AwaitFrom),
            vec![Outbound::text(texts::CURRENCIES_BAD_CODE)],
        ),
    }
}

pub(super) fn on_to(from: &str, text: &str) -> Transition {
    match CurrencyCode::parse(text) {
        Some(to) => Transition::to(
            Dialog::Currency(CurrencyStep::AwaitAmount {
                from: from.to_string(),
                to: to.as_str().to_string(),
            }),
            vec![Outbound::text(texts::CURRENCIES_ASK_AMOUNT)],
        ),
        None => Transition::to(
            Dialog::Currency(CurrencyStep::AwaitTo {
                from: from.to_string(),
            }),
            vec![Outbound::text(texts::CURRENCIES_BAD_CODE)],
        ),
    }
}

/// Integer or fractional decimal; infinities and NaN are not amounts.
pub(crate) fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Converts and ends the dialog whatever the outcome.
pub(super) async fn on_amount(
    service: &dyn CurrencyService,
    from: &str,
    to: &str,
    text: &str,
) -> Transition {
    let Some(amount) = parse_amount(text) else {
        return Transition::to(
            Dialog::Currency(CurrencyStep::AwaitAmount {
                from: from.to_string(),
                to: to.to_string(),
            }),
            vec![Outbound::text(texts::CURRENCIES_BAD_AMOUNT)],
        );
    };

    let (Some(from), Some(to)) = (CurrencyCode::parse(from), CurrencyCode::parse(to)) else {
        warn!(from, to, "Stored currency codes are not valid; ending dialog");
        return Transition::reset(vec![Outbound::text(texts::SERVICE_UNAVAILABLE)]);
    };

    let request = ConversionRequest { from, to, amount };
    let reply = match service.convert(&request).await {
        Ok(result) => texts::conversion(
            amount,
            request.from.as_str(),
            result.converted_amount,
            request.to.as_str(),
        ),
        Err(ServiceError::InvalidInput(message)) => {
            warn!(%message, "Conversion rejected by provider");
            texts::CURRENCIES_CONVERSION_ERROR.to_string()
        }
        Err(e) => {
            warn!(error = %e, "Conversion failed");
            texts::SERVICE_UNAVAILABLE.to_string()
        }
    };
    Transition::reset(vec![Outbound::text(reply)])
}
