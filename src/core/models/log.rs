use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One node log record. Keys the client does not know about are kept in
/// `extra` so they can still be shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unparseable timestamps become `None` instead of failing the record.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, alias = "levelname", skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub message: String,
    /// Logger name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Timezone-less formats, read as UTC. The last one is Python's `asctime`.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S,%3f",
];

/// Parse a log timestamp: RFC 3339 first, then a naive date-time in UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match &value {
        Some(Value::String(raw)) => parse_timestamp(raw),
        // Unix seconds, as in a logging record's `created`
        Some(Value::Number(secs)) => secs
            .as_f64()
            .and_then(|secs| DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)),
        _ => None,
    };
    if parsed.is_none() {
        if let Some(raw) = value.filter(|v| !v.is_null()) {
            tracing::debug!(%raw, "unrecognized log timestamp");
        }
    }
    Ok(parsed)
}

impl LogEntry {
    pub fn level_or_default(&self) -> &str {
        self.level.as_deref().unwrap_or("INFO")
    }

    /// Extension fields as "key=value", sorted by key. Strings are unquoted.
    pub fn extra_pairs(&self) -> Vec<String> {
        self.extra
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{}={}", key, s),
                other => format!("{}={}", key, other),
            })
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum LogsResponse {
    Wrapped { logs: Vec<LogEntry> },
    Bare(Vec<LogEntry>),
}

impl LogsResponse {
    pub fn into_entries(self) -> Vec<LogEntry> {
        match self {
            Self::Wrapped { logs } => logs,
            Self::Bare(logs) => logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_land_in_extra() {
        let json = r#"{
            "timestamp": "2025-03-01T12:00:00Z",
            "levelname": "ERROR",
            "message": "upstream failed",
            "name": "router.proxy",
            "request_id": "abc123",
            "status_code": 502,
            "model": "openai/gpt-4o"
        }"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.level_or_default(), "ERROR");
        assert_eq!(entry.request_id.as_deref(), Some("abc123"));
        assert_eq!(entry.extra.len(), 2);
        assert_eq!(
            entry.extra_pairs(),
            vec!["model=openai/gpt-4o".to_string(), "status_code=502".to_string()]
        );
    }

    #[test]
    fn minimal_entry_defaults() {
        let entry: LogEntry = serde_json::from_str(r#"{ "message": "hi" }"#).unwrap();
        assert!(entry.timestamp.is_none());
        assert_eq!(entry.level_or_default(), "INFO");
        assert!(entry.extra.is_empty());
    }

    #[test]
    fn extra_fields_survive_serialization() {
        let json = r#"{ "message": "m", "cost_msats": 1200 }"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["cost_msats"], 1200);
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let entry: LogEntry =
            serde_json::from_str(r#"{ "timestamp": "2025-03-01T12:00:00.123456", "message": "m" }"#)
                .unwrap();
        let ts = entry.timestamp.unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T12:00:00.123456+00:00");

        let asctime = parse_timestamp("2025-03-01 12:00:00,123").unwrap();
        assert_eq!(asctime.timestamp_millis(), ts.timestamp_millis());

        let offset = parse_timestamp("2025-03-01T13:00:00+01:00").unwrap();
        assert_eq!(offset.timestamp(), ts.timestamp());
    }

    #[test]
    fn epoch_seconds_timestamp() {
        let entry: LogEntry =
            serde_json::from_str(r#"{ "timestamp": 1740830400.5, "message": "m" }"#).unwrap();
        assert_eq!(entry.timestamp.unwrap().timestamp_millis(), 1_740_830_400_500);
    }

    #[test]
    fn unparseable_timestamp_keeps_the_rest_of_the_list() {
        let json = r#"[
            { "timestamp": "2025-03-01T12:00:00Z", "message": "a" },
            { "timestamp": "yesterday-ish", "message": "b", "status": 502 },
            { "timestamp": null, "message": "c" }
        ]"#;
        let entries = serde_json::from_str::<LogsResponse>(json)
            .unwrap()
            .into_entries();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].timestamp.is_some());
        assert!(entries[1].timestamp.is_none());
        assert_eq!(entries[1].message, "b");
        assert_eq!(entries[1].extra_pairs(), vec!["status=502".to_string()]);
        assert!(entries[2].timestamp.is_none());
    }

    #[test]
    fn logs_response_accepts_both_shapes() {
        let wrapped: LogsResponse =
            serde_json::from_str(r#"{ "logs": [{ "message": "a" }], "total": 1 }"#).unwrap();
        assert_eq!(wrapped.into_entries().len(), 1);

        let bare: LogsResponse =
            serde_json::from_str(r#"[{ "message": "a" }, { "message": "b" }]"#).unwrap();
        assert_eq!(bare.into_entries().len(), 2);
    }
}
