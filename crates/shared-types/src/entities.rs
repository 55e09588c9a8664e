//! # Message Entities
//!
//! The signed SMS message as it travels from the signer to this verifier.
//!
//! `SmsPayload` is a protobuf message. Its binary encoding is the canonical
//! form both sides hash, so the field numbers below are part of the signing
//! contract and must never be renumbered or reused.
//!
//! The JSON form follows the protobuf JSON mapping: lowerCamelCase names,
//! absent fields take their defaults, unknown fields are ignored and `int64`
//! values may arrive either as numbers or as decimal strings.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Identifier reported when a request carries no payload to take one from.
pub const UNKNOWN_MESSAGE_ID: &str = "unknown";

/// The signed portion of an SMS message.
///
/// Only scalar fields are allowed here: maps and repeated fields would give
/// the encoding more than one valid byte form.
#[serde_as]
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsPayload {
    /// Stable message identifier, reported back in every outcome.
    #[prost(string, tag = "1")]
    pub message_id: String,
    /// Originating address (MSISDN or alphanumeric sender id).
    #[prost(string, tag = "2")]
    pub sender: String,
    /// Destination address.
    #[prost(string, tag = "3")]
    pub recipient: String,
    /// Message body.
    #[prost(string, tag = "4")]
    pub content: String,
    /// Creation time set by the signer, epoch milliseconds.
    #[prost(int64, tag = "5")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub timestamp: i64,
}

/// A payload together with its detached signature (the "signed message").
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsRequest {
    /// The signed payload. `None` when the sender omitted it.
    #[prost(message, optional, tag = "1")]
    pub payload: Option<SmsPayload>,
    /// Standard base64 (padded) RSA signature over the payload.
    #[prost(string, tag = "2")]
    pub message_signature: String,
}

impl SmsRequest {
    /// Build a request from a payload and its base64 signature.
    pub fn new(payload: SmsPayload, message_signature: impl Into<String>) -> Self {
        Self {
            payload: Some(payload),
            message_signature: message_signature.into(),
        }
    }

    /// The payload's identifier, or [`UNKNOWN_MESSAGE_ID`] when there is no payload.
    pub fn message_id(&self) -> &str {
        self.payload
            .as_ref()
            .map_or(UNKNOWN_MESSAGE_ID, |p| p.message_id.as_str())
    }
}
