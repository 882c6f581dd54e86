use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// The API emits `created_at` either as RFC 3339 or as a naive timestamp
/// that is implicitly UTC.
fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(datetime) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(datetime.to_utc());
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Profile of the authenticated user, as returned by `/users/me` and
/// `/users/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub role: String,
}

impl Identity {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Book as listed by `/books/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category_id: i64,
    pub category: Option<Category>,
    pub available_copies: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetail {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub category_id: i64,
    pub category: Option<Category>,
    pub total_copies: i32,
    pub available_copies: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookQuery {
    pub category_id: Option<i64>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReservationStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [
        ReservationStatus::Active,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub book_id: i64,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub book: Option<BookSummary>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub status: ReservationStatus,
}

/// Error payload of the remote API: either a plain message or the list of
/// field violations produced by request validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub detail: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Violations(Vec<Violation>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Violation {
    pub loc: Vec<LocationSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocationSegment {
    Field(String),
    Index(i64),
}

impl fmt::Display for LocationSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSegment::Field(name) => f.write_str(name),
            LocationSegment::Index(index) => write!(f, "{index}"),
        }
    }
}
