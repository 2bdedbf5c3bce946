pub mod telegram;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::DeliveryError;

/// Delivers text to the single fixed recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Send `text`, logging the outcome. Delivery failures never propagate;
/// the return value tells the caller whether the message got through.
pub async fn send_message<N>(notifier: &N, text: &str) -> bool
where
    N: Notifier + ?Sized,
{
    match notifier.notify(text).await {
        Ok(()) => {
            debug!("Message delivered: {}", text);
            true
        }
        Err(e) => {
            error!("Message not delivered: {}", e);
            false
        }
    }
}
