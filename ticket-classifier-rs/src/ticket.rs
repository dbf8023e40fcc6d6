// ticket-classifier-rs/src/ticket.rs
// Input and output records for ticket classification

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::classifier::Decision;

/// Incoming support ticket.
///
/// Every field is free text. Missing, `null` or non-string values collapse to
/// the empty string so that a malformed ticket still yields a classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub severity: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub channel: String,
}

impl Ticket {
    pub fn new(
        summary: impl Into<String>,
        severity: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            severity: severity.into(),
            channel: channel.into(),
        }
    }

    /// Build a ticket from an arbitrary JSON value.
    ///
    /// Anything that is not an object becomes an empty ticket.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            summary: field("summary"),
            severity: field("severity"),
            channel: field("channel"),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// Channel and severity echoed back, lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketMetadata {
    pub channel: String,
    pub severity: String,
}

/// Routing result for a single ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub decision: Decision,
    pub reasoning: String,
    pub next_actions: Vec<String>,
    pub metadata: TicketMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_missing_fields_default_to_empty() {
        let ticket: Ticket = serde_json::from_value(json!({"summary": "App crash"})).unwrap();
        assert_eq!(ticket.summary, "App crash");
        assert_eq!(ticket.severity, "");
        assert_eq!(ticket.channel, "");
    }

    #[test]
    fn test_deserialize_non_string_fields() {
        let ticket: Ticket = serde_json::from_value(json!({
            "summary": null,
            "severity": 3,
            "channel": ["Email"]
        }))
        .unwrap();
        assert_eq!(ticket, Ticket::default());
    }

    #[test]
    fn test_from_value_non_object() {
        assert_eq!(Ticket::from_value(&json!(42)), Ticket::default());
        assert_eq!(Ticket::from_value(&json!("crash")), Ticket::default());
        assert_eq!(Ticket::from_value(&Value::Null), Ticket::default());
    }

    #[test]
    fn test_from_value_object() {
        let ticket = Ticket::from_value(&json!({
            "channel": "Chat",
            "severity": "Medium",
            "summary": "Unable to reset login PIN",
            "extra": true
        }));
        assert_eq!(ticket, Ticket::new("Unable to reset login PIN", "Medium", "Chat"));
    }
}
