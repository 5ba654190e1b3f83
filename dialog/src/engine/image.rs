//! `/funny`: one image, no dialog.

use providers::ImageService;
use tracing::warn;

use crate::outbound::Outbound;
use crate::texts;

pub(super) async fn funny(images: &dyn ImageService, tag: &str) -> Vec<Outbound> {
    let mut replies = vec![Outbound::text(texts::WAIT_MOMENT)];
    match images.random_image(tag).await {
        Ok(bytes) => replies.push(Outbound::Image(bytes)),
        Err(e) => {
            warn!(error = %e, tag, "Image fetch failed");
            replies.push(Outbound::text(texts::SERVICE_UNAVAILABLE));
        }
    }
    replies
}
