//! Feedback API request and response types.
//!
//! These types model the JSON exchanged with the feedback service, plus the
//! fixed course and faculty catalogues the submission form offers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Name transmitted in place of the student's when submitting anonymously.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Email transmitted in place of the student's when submitting anonymously.
pub const ANONYMOUS_EMAIL: &str = "anonymous@example.com";

/// A course that feedback can be given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    #[serde(rename = "BCA Year 1 (2024-2027)")]
    BcaYear1,
    #[serde(rename = "BCA Year 2 (2025-2028)")]
    BcaYear2,
    #[serde(rename = "BCA Year 3 (2026-2029)")]
    BcaYear3,
}

impl Course {
    /// Every course, in the order the form offers them.
    pub const ALL: [Course; 3] = [Course::BcaYear1, Course::BcaYear2, Course::BcaYear3];

    /// The display (and wire) name of the course.
    pub fn as_str(&self) -> &'static str {
        match self {
            Course::BcaYear1 => "BCA Year 1 (2024-2027)",
            Course::BcaYear2 => "BCA Year 2 (2025-2028)",
            Course::BcaYear3 => "BCA Year 3 (2026-2029)",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A faculty member that feedback can be given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faculty {
    Meenakshi,
    Kiranpreet,
    Karuna,
    Ashwini,
    Pratieksha,
}

impl Faculty {
    /// Every faculty member, in the order the form offers them.
    pub const ALL: [Faculty; 5] = [
        Faculty::Meenakshi,
        Faculty::Kiranpreet,
        Faculty::Karuna,
        Faculty::Ashwini,
        Faculty::Pratieksha,
    ];

    /// The display (and wire) name of the faculty member.
    pub fn as_str(&self) -> &'static str {
        match self {
            Faculty::Meenakshi => "Meenakshi",
            Faculty::Kiranpreet => "Kiranpreet",
            Faculty::Karuna => "Karuna",
            Faculty::Ashwini => "Ashwini",
            Faculty::Pratieksha => "Pratieksha",
        }
    }
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub course: Course,
    pub faculty: Faculty,
    /// Overall rating, always within 1..=5.
    pub rating: u8,
    pub comment: String,
    /// Serialised as `YYYY-MM-DD`.
    pub feedback_date: NaiveDate,
}

/// Optional acknowledgement returned by the create endpoint.
///
/// The same shape is used for error bodies, so `message` is the only field
/// the client relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A stored feedback record as returned by `GET /api/feedback`.
///
/// Stored records are loosely shaped: any field may be missing or `null`,
/// and both map to the field's empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Identifier assigned by the store.
    #[serde(rename = "_id", default)]
    pub store_id: Option<String>,
    /// Identifier under its plain name, sent by some deployments alongside or
    /// instead of `_id`.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub plain_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub faculty: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub feedback_date: Option<String>,
    /// Creation timestamp assigned by the store, RFC 3339.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl FeedbackRecord {
    /// The record's identifier, preferring `_id` over `id`.
    pub fn id(&self) -> Option<&str> {
        self.store_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(self.plain_id.as_deref())
    }
}

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A per-faculty submission count from `GET /api/feedback/faculty-stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyCount {
    /// The faculty name the server grouped by.
    #[serde(rename = "_id", default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub count: u64,
}
