use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout Ridder uses for date-time fields.
pub const DATE_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

// ============ Contacts ============

/// A contact person attached to an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Contact {
    /// Ridder's durable identifier, used for Get/Update paths.
    #[serde(rename = "RidderId", deserialize_with = "null_default")]
    pub ridder_id: i32,
    /// Correlation key in Insightly.
    #[serde(rename = "InsightlyId", deserialize_with = "null_default")]
    pub insightly_id: i32,
    #[serde(deserialize_with = "null_default")]
    pub person: Person,
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(deserialize_with = "null_default")]
    pub cellphone: String,
    #[serde(deserialize_with = "null_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_default")]
    pub manual: bool,
    #[serde(deserialize_with = "null_default")]
    pub main_contact: bool,
    #[serde(deserialize_with = "null_default")]
    pub main_contact_creditor: bool,
    #[serde(deserialize_with = "null_default")]
    pub main_contact_debtor: bool,
    #[serde(deserialize_with = "null_default")]
    pub function_name: String,
    #[serde(deserialize_with = "null_default")]
    pub employment_terminated: bool,
    #[serde(rename = "OrganizationId", deserialize_with = "null_default")]
    pub organization_id: i32,
}

/// Personal details embedded in a `Contact`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Person {
    #[serde(deserialize_with = "null_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_default")]
    pub prefix: String,
    /// Ridder title code.
    #[serde(deserialize_with = "null_default")]
    pub title: i32,
    #[serde(deserialize_with = "null_default")]
    pub initials: String,
    /// Ridder gender code.
    #[serde(deserialize_with = "null_default")]
    pub gender: i32,
    #[serde(deserialize_with = "null_default")]
    pub deceased: bool,
}

// ============ Organizations ============

/// A customer or supplier organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Organization {
    #[serde(rename = "RidderId", deserialize_with = "null_default")]
    pub ridder_id: i32,
    #[serde(rename = "InsightlyId", deserialize_with = "null_default")]
    pub insightly_id: i32,
    #[serde(deserialize_with = "null_default")]
    pub organization_name: String,
    #[serde(deserialize_with = "null_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_default")]
    pub website: String,
    #[serde(deserialize_with = "null_default")]
    pub email_address: String,
    /// Sales person id; Ridder calls the field `SalesPerson`.
    #[serde(rename = "SalesPerson", deserialize_with = "null_default")]
    pub account_manager: i32,
    #[serde(deserialize_with = "null_default")]
    pub billing_address: Address,
    #[serde(deserialize_with = "null_default")]
    pub shipping_address: Address,
    #[serde(deserialize_with = "null_default")]
    pub expired: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    #[serde(deserialize_with = "null_default")]
    pub house_number: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub zip_code: String,
    #[serde(deserialize_with = "null_default")]
    pub street: String,
}

// ============ Opportunities ============

/// A sales opportunity (offer) in Ridder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Opportunity {
    #[serde(rename = "RidderId", deserialize_with = "null_default")]
    pub ridder_id: i32,
    #[serde(rename = "InsightlyId", deserialize_with = "null_default")]
    pub insightly_id: i32,
    #[serde(deserialize_with = "null_default")]
    pub insightly_state: String,
    #[serde(deserialize_with = "null_default")]
    pub offer_number: i32,
    #[serde(deserialize_with = "null_default")]
    pub opportunity_name: String,
    #[serde(rename = "OrganizationId", deserialize_with = "null_default")]
    pub organization_id: i32,
    #[serde(rename = "ContactId", deserialize_with = "null_default")]
    pub contact_id: i32,
    #[serde(deserialize_with = "null_default")]
    pub currency: String,
    /// Omitted from the body when absent.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "ridder_date_time"
    )]
    pub opportunity_created: Option<NaiveDateTime>,
    /// Sent as `null` when absent.
    #[serde(with = "ridder_date_time")]
    pub forecast_close_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "null_default")]
    pub probability_of_winning: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_person: Option<i32>,
    #[serde(deserialize_with = "null_default")]
    pub external_key: String,
    /// Server-maintained version used for optimistic concurrency.
    #[serde(deserialize_with = "null_default")]
    pub revision: i32,
}

/// Server-assigned state returned by opportunity create/update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OpportunityResponse {
    #[serde(rename = "RidderId", deserialize_with = "null_default")]
    pub ridder_id: i32,
    #[serde(deserialize_with = "null_default")]
    pub offer_number: i32,
    #[serde(deserialize_with = "null_default")]
    pub revision: i32,
}

/// Server-side state transition for an opportunity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Workflow {
    /// No transition; never sent to Ridder.
    #[default]
    None,
    Reject,
    RejectAndMakeHistoric,
    MakeHistoric,
    ReOpen,
}

impl Workflow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Workflow::None => "None",
            Workflow::Reject => "Reject",
            Workflow::RejectAndMakeHistoric => "RejectAndMakeHistoric",
            Workflow::MakeHistoric => "MakeHistoric",
            Workflow::ReOpen => "ReOpen",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Workflow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Workflow::None),
            "Reject" => Ok(Workflow::Reject),
            "RejectAndMakeHistoric" => Ok(Workflow::RejectAndMakeHistoric),
            "MakeHistoric" => Ok(Workflow::MakeHistoric),
            "ReOpen" => Ok(Workflow::ReOpen),
            other => Err(format!("Unknown workflow '{}'", other)),
        }
    }
}

// ============ Errors ============

/// Body of a non-success Ridder response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub error: Option<String>,
    #[serde(rename = "stackTrace")]
    pub stack_trace: Option<String>,
}

/// Decodes a JSON `null` as the type's default value.
///
/// Ridder sends `null` for unset strings and numbers; missing keys are
/// covered by the container-level `#[serde(default)]`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Serde codec for optional `YYYY-MM-DDTHH:MM:SS` date-times.
///
/// Decoding also accepts fractional seconds, a bare `YYYY-MM-DD` (midnight)
/// and RFC 3339 with an offset, which keeps the wall-clock time as sent.
pub mod ridder_date_time {
    use super::DATE_TIME_LAYOUT;
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(DATE_TIME_LAYOUT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date '{}'", s))),
        }
    }

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s, DATE_TIME_LAYOUT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
}
