//! Broadcast transport between widgets
//!
//! Widgets sharing a channel exchange property updates over a
//! publish/subscribe transport the host provides (a BroadcastChannel in
//! browsers). Outgoing messages go through the trait; incoming messages are
//! host-driven and fed into the sync manager by the embedding glue.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::PropertyValue;

/// One property update on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncMessage {
    /// Name of the property that changed
    pub property: String,

    /// The master's value, untransformed
    pub value: PropertyValue,

    /// Id of the emitting widget; receivers drop their own messages
    pub master_id: String,

    /// Sync channel this message belongs to
    pub channel: String,

    /// Emission time in milliseconds since the Unix epoch
    pub ts: u64,
}

/// Errors from the broadcast transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Broadcast channel unavailable: {message}")]
    Unavailable { message: String },

    #[error("Failed to publish message: {message}")]
    PublishFailed { message: String },
}

/// Result type alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Outgoing half of the broadcast channel.
pub trait BroadcastTransport {
    /// Publish a message to every other widget on the channel.
    fn publish(&self, message: &SyncMessage) -> TransportResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serde_round_trip() {
        let message = SyncMessage {
            property: "camera".to_string(),
            value: PropertyValue::Number(3.5),
            master_id: "widget-a".to_string(),
            channel: "main".to_string(),
            ts: 1_700_000_000_000,
        };

        let json = serde_json::to_string(&message).unwrap();
        let back: SyncMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(message, back);
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::PublishFailed {
            message: "channel closed".to_string(),
        };
        assert!(err.to_string().contains("channel closed"));
    }
}
