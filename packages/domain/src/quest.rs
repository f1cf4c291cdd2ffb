//! # Quest records as served by the mail backend
//!
//! A quest (service request) travels through `preparing → pending → completed/refuse`
//! and may be moved to the trash. The backend speaks a loosely typed JSON dialect,
//! so the types here absorb its quirks at the serde boundary:
//!
//! | JSON key | Field | Notes |
//! |----------|-------|-------|
//! | `id` | [`QuestRecord::id`] | number or string; kept as text |
//! | `statue` | [`QuestRecord::status`] | `status` accepted too |
//! | `anytime` | [`QuestRecord::subcategory`] | `subcategory` accepted too |
//! | `isImportant` | [`QuestRecord::is_important`] | missing or `null` is `false` |
//! | `sentAt` / `time` | request / availability timestamps | text or number; displayed, never computed on |
//!
//! The trash marker on the wire is the literal `"휴지통"`.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Wire value of the trash status.
pub const TRASH_MARKER: &str = "휴지통";

/// Identifier of a quest record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MailId(String);

impl MailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for MailId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for MailId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MailId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for MailId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => MailId::from(n),
            RawId::Text(s) => MailId(s),
        })
    }
}

/// Lifecycle status of a quest.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestStatus {
    Preparing,
    Pending,
    Completed,
    Refuse,
    Trash,
    /// A status this client does not know about. Shown in the active view only.
    Other(String),
}

impl QuestStatus {
    /// The statuses a user can filter on from the menu, in menu order.
    pub const FILTERABLE: [QuestStatus; 4] = [
        QuestStatus::Preparing,
        QuestStatus::Pending,
        QuestStatus::Completed,
        QuestStatus::Refuse,
    ];

    /// Key used in the `status` query parameter.
    pub fn key(&self) -> &str {
        match self {
            QuestStatus::Preparing => "preparing",
            QuestStatus::Pending => "pending",
            QuestStatus::Completed => "completed",
            QuestStatus::Refuse => "refuse",
            QuestStatus::Trash => "trash",
            QuestStatus::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            QuestStatus::Preparing => "신청중",
            QuestStatus::Pending => "보류중",
            QuestStatus::Completed => "신청완료",
            QuestStatus::Refuse => "신청거절",
            QuestStatus::Trash => TRASH_MARKER,
            QuestStatus::Other(s) => s,
        }
    }

    pub fn is_trash(&self) -> bool {
        matches!(self, QuestStatus::Trash)
    }
}

impl Default for QuestStatus {
    fn default() -> Self {
        QuestStatus::Other(String::new())
    }
}

impl From<String> for QuestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "preparing" => QuestStatus::Preparing,
            "pending" => QuestStatus::Pending,
            "completed" => QuestStatus::Completed,
            "refuse" => QuestStatus::Refuse,
            TRASH_MARKER | "trash" => QuestStatus::Trash,
            _ => QuestStatus::Other(value),
        }
    }
}

impl From<QuestStatus> for String {
    fn from(status: QuestStatus) -> Self {
        match status {
            QuestStatus::Trash => TRASH_MARKER.to_string(),
            QuestStatus::Other(s) => s,
            other => other.key().to_string(),
        }
    }
}

/// A single quest (mail) record.
///
/// Field decoding is lenient so one odd record never fails a whole `GET /mails`:
/// `null` reads as the field's empty value and numbers are accepted where text is
/// expected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRecord {
    pub id: MailId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(
        default,
        rename = "anytime",
        alias = "subcategory",
        deserialize_with = "lenient_text"
    )]
    pub subcategory: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, rename = "statue", alias = "status")]
    pub status: QuestStatus,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_important: bool,
    /// When the quest was requested. Epoch milliseconds arrive as their digits.
    #[serde(default, deserialize_with = "lenient_text")]
    pub sent_at: String,
    /// When the quest can be taken on.
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<RawText>::deserialize(deserializer)? {
        None => String::new(),
        Some(RawText::Integer(n)) => n.to_string(),
        Some(RawText::Float(f)) if f.fract() == 0.0 => format!("{f:.0}"),
        Some(RawText::Float(f)) => f.to_string(),
        Some(RawText::Text(s)) => s,
    })
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl QuestRecord {
    /// `sentAt` formatted as `YYYY. MM. DD`, or the raw value if it does not parse.
    pub fn requested_at_display(&self) -> String {
        match parse_timestamp(&self.sent_at) {
            Some(date) => date.format("%Y. %m. %d").to_string(),
            None => self.sent_at.clone(),
        }
    }
}

/// Digit runs longer than a compact `YYYYMMDD` date are epoch milliseconds.
const EPOCH_MILLIS_MIN_DIGITS: usize = 9;

/// Parse the timestamp forms the backend produces into a local calendar date.
fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() >= EPOCH_MILLIS_MIN_DIGITS && raw.bytes().all(|b| b.is_ascii_digit()) {
        let millis = raw.parse::<i64>().ok()?;
        return DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_record() {
        let json = r#"{
            "id": 5,
            "category": "디자인",
            "anytime": "로고",
            "title": "로고 제작 의뢰",
            "statue": "pending",
            "isImportant": true,
            "sentAt": "2024-03-05 10:20:00",
            "time": "평일 오후"
        }"#;
        let record: QuestRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, MailId::from(5));
        assert_eq!(record.subcategory, "로고");
        assert_eq!(record.status, QuestStatus::Pending);
        assert!(record.is_important);
        assert_eq!(record.requested_at_display(), "2024. 03. 05");
        assert_eq!(record.time, "평일 오후");
    }

    #[test]
    fn test_trash_marker_and_aliases() {
        let json = r#"[
            {"id": "a1", "statue": "휴지통"},
            {"id": "a2", "status": "trash", "subcategory": "sub"}
        ]"#;
        let records: Vec<QuestRecord> = serde_json::from_str(json).unwrap();
        assert!(records[0].status.is_trash());
        assert!(records[1].status.is_trash());
        assert_eq!(records[1].subcategory, "sub");
        assert_eq!(records[0].id.as_str(), "a1");
        assert!(!records[0].is_important);
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let record: QuestRecord =
            serde_json::from_str(r#"{"id": 1, "statue": "archived"}"#).unwrap();
        assert_eq!(record.status, QuestStatus::Other("archived".to_string()));
        assert!(!record.status.is_trash());

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["statue"], "archived");
    }

    #[test]
    fn test_trash_serializes_to_marker() {
        assert_eq!(String::from(QuestStatus::Trash), TRASH_MARKER);
        assert_eq!(String::from(QuestStatus::Refuse), "refuse");
    }

    #[test]
    fn test_epoch_millis_sent_at_keeps_the_batch() {
        let json = r#"[
            {"id": 1, "statue": "pending", "sentAt": 1709640000000, "time": 1800},
            {"id": 2, "statue": "preparing", "sentAt": "2024-03-05"}
        ]"#;
        let records: Vec<QuestRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);

        let expected = DateTime::from_timestamp_millis(1709640000000)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y. %m. %d")
            .to_string();
        assert_eq!(records[0].sent_at, "1709640000000");
        assert_eq!(records[0].requested_at_display(), expected);
        assert_eq!(records[0].time, "1800");
        assert_eq!(records[1].requested_at_display(), "2024. 03. 05");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let json = r#"[
            {"id": 1, "isImportant": null, "title": null, "sentAt": null},
            {"id": 2, "isImportant": true}
        ]"#;
        let records: Vec<QuestRecord> = serde_json::from_str(json).unwrap();
        assert!(!records[0].is_important);
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].requested_at_display(), "");
        assert!(records[1].is_important);
    }

    #[test]
    fn test_unparseable_sent_at_is_shown_raw() {
        let record: QuestRecord =
            serde_json::from_str(r#"{"id": 1, "sentAt": "어제"}"#).unwrap();
        assert_eq!(record.requested_at_display(), "어제");
    }
}
