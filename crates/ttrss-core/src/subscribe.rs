//! Decoding of the `subscribeToFeed` result.
//!
//! A subscribe call that reaches the server "succeeds" at the envelope level
//! even when nothing was subscribed. The real outcome is buried in
//! `content.status` as `{"code": int, "message": string?}`.

use serde_json::{Map, Value};

use crate::errors::ClientError;
use crate::json::integral;

/// Message used when the API gives no underlying detail.
pub const NO_MESSAGE_TEXT: &str = "(no underlying error returned by API)";

/// Result code of a subscribe attempt. Wire values are contiguous from 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubscribeCode {
    AlreadySubscribed = 0,
    Added = 1,
    InvalidUrl = 2,
    HtmlNoFeeds = 3,
    HtmlMultipleFeeds = 4,
    GetFailed = 5,
    XmlInvalid = 6,
}

impl SubscribeCode {
    /// All codes in wire order.
    pub const ALL: [Self; 7] = [
        Self::AlreadySubscribed,
        Self::Added,
        Self::InvalidUrl,
        Self::HtmlNoFeeds,
        Self::HtmlMultipleFeeds,
        Self::GetFailed,
        Self::XmlInvalid,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    /// Whether the feed is subscribed after this outcome.
    pub fn is_subscribed(self) -> bool {
        matches!(self, Self::Added | Self::AlreadySubscribed)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AlreadySubscribed => "already subscribed to feed",
            Self::Added => "feed added",
            Self::InvalidUrl => "invalid feed URL",
            Self::HtmlNoFeeds => "no feed link found in HTML at URL",
            Self::HtmlMultipleFeeds => "multiple feed links found in HTML at URL",
            Self::GetFailed => "unable to GET URL",
            Self::XmlInvalid => "invalid XML at URL",
        }
    }
}

impl std::fmt::Display for SubscribeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Code and server message of a subscribe attempt.
///
/// Implements [`std::error::Error`] so it can be propagated, but it is
/// informational: [`Subscription::subscribed`] decides success.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct SubscriptionOutcome {
    pub code: SubscribeCode,
    pub message: String,
}

/// Classified result of `subscribeToFeed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    /// True for [`SubscribeCode::Added`] and [`SubscribeCode::AlreadySubscribed`].
    pub subscribed: bool,
    pub outcome: SubscriptionOutcome,
}

impl Subscription {
    /// Convert a non-subscribed outcome into [`ClientError::Subscribe`].
    pub fn into_result(self) -> Result<SubscriptionOutcome, ClientError> {
        if self.subscribed {
            Ok(self.outcome)
        } else {
            Err(ClientError::Subscribe(self.outcome))
        }
    }
}

/// Decode `content.status` of a subscribe response.
pub fn decode_subscribe(content: &Map<String, Value>) -> Result<Subscription, ClientError> {
    let status_value = content
        .get("status")
        .ok_or_else(|| ClientError::protocol("subscribe: content lacks status key"))?;
    let status = status_value.as_object().ok_or_else(|| {
        ClientError::protocol(format!(
            "subscribe: status is not a JSON object: {status_value}"
        ))
    })?;

    let raw = status
        .get("code")
        .and_then(integral)
        .ok_or_else(|| {
            ClientError::protocol(format!(
                "subscribe: status has no numeric code: {status_value}"
            ))
        })?;

    let code = SubscribeCode::from_code(raw)
        .ok_or_else(|| ClientError::protocol(format!("subscribe: unknown status code {raw}")))?;

    let message = status
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(NO_MESSAGE_TEXT)
        .to_string();

    Ok(Subscription {
        subscribed: code.is_subscribed(),
        outcome: SubscriptionOutcome { code, message },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn content(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn added_with_message() {
        let sub = decode_subscribe(&content(json!({"status": {"code": 1, "message": "ok"}}))).unwrap();
        assert!(sub.subscribed);
        assert_eq!(sub.outcome.code, SubscribeCode::Added);
        assert_eq!(sub.outcome.message, "ok");
    }

    #[test]
    fn already_subscribed_without_message() {
        let sub = decode_subscribe(&content(json!({"status": {"code": 0}}))).unwrap();
        assert!(sub.subscribed);
        assert_eq!(sub.outcome.code, SubscribeCode::AlreadySubscribed);
        assert_eq!(sub.outcome.message, NO_MESSAGE_TEXT);
    }

    #[test]
    fn failure_codes_are_not_subscribed() {
        for code in 2..=6 {
            let sub = decode_subscribe(&content(json!({"status": {"code": code, "message": "x"}}))).unwrap();
            assert!(!sub.subscribed, "code {code} should not subscribe");
            assert_eq!(sub.outcome.code.code(), code);
        }
    }

    #[test]
    fn out_of_range_code_is_protocol_error() {
        let err = decode_subscribe(&content(json!({"status": {"code": 99}}))).unwrap_err();
        assert_matches!(err, ClientError::Protocol(msg) if msg.contains("99"));

        let err = decode_subscribe(&content(json!({"status": {"code": -1}}))).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn missing_or_malformed_status() {
        assert!(decode_subscribe(&content(json!({}))).unwrap_err().is_protocol());
        assert!(decode_subscribe(&content(json!({"status": 1}))).unwrap_err().is_protocol());
        assert!(decode_subscribe(&content(json!({"status": {}}))).unwrap_err().is_protocol());
        assert!(decode_subscribe(&content(json!({"status": {"code": "1"}})))
            .unwrap_err()
            .is_protocol());
    }

    #[test]
    fn float_codes() {
        let sub = decode_subscribe(&content(json!({"status": {"code": 2.0}}))).unwrap();
        assert_eq!(sub.outcome.code, SubscribeCode::InvalidUrl);
        assert!(decode_subscribe(&content(json!({"status": {"code": 1.5}})))
            .unwrap_err()
            .is_protocol());
    }

    #[test]
    fn non_string_message_defaults() {
        let sub = decode_subscribe(&content(json!({"status": {"code": 5, "message": 404}}))).unwrap();
        assert_eq!(sub.outcome.message, NO_MESSAGE_TEXT);
    }

    #[test]
    fn into_result_splits_on_subscribed() {
        let ok = decode_subscribe(&content(json!({"status": {"code": 1}}))).unwrap();
        assert_eq!(ok.into_result().unwrap().code, SubscribeCode::Added);

        let bad = decode_subscribe(&content(json!({"status": {"code": 6, "message": "bad xml"}}))).unwrap();
        assert_matches!(
            bad.into_result(),
            Err(ClientError::Subscribe(SubscriptionOutcome { code: SubscribeCode::XmlInvalid, .. }))
        );
    }

    #[test]
    fn outcome_display() {
        let outcome = SubscriptionOutcome {
            code: SubscribeCode::GetFailed,
            message: "HTTP 500".into(),
        };
        assert_eq!(outcome.to_string(), "unable to GET URL: HTTP 500");
    }

    #[test]
    fn code_round_trip_over_all() {
        for code in SubscribeCode::ALL {
            assert_eq!(SubscribeCode::from_code(code.code()), Some(code));
        }
        assert_eq!(SubscribeCode::from_code(7), None);
    }
}
