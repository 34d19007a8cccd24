//! Field cleaning applied before every create/update.
//!
//! Validation never fails a call. Over-long fields are cut to Ridder's column
//! sizes and characters Ridder rejects in names are replaced by a dot; every
//! change produces a human-readable warning.

use crate::models::{Address, Contact, Opportunity, Organization};
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_LENGTH_ORGANIZATION_EMAIL: usize = 255;
pub const MAX_LENGTH_ORGANIZATION_NAME: usize = 60;
pub const MAX_LENGTH_ORGANIZATION_PHONE: usize = 50;
pub const MAX_LENGTH_ORGANIZATION_WEBSITE: usize = 255;
pub const MAX_LENGTH_ADDRESS_HOUSE_NUMBER: usize = 50;
pub const MAX_LENGTH_ADDRESS_CITY: usize = 50;
pub const MAX_LENGTH_ADDRESS_ZIP_CODE: usize = 50;
pub const MAX_LENGTH_ADDRESS_STREET: usize = 50;
pub const MAX_LENGTH_CONTACT_PHONE: usize = 50;
pub const MAX_LENGTH_CONTACT_EMAIL: usize = 255;
pub const MAX_LENGTH_CONTACT_FUNCTION_NAME: usize = 150;
pub const MAX_LENGTH_CONTACT_CELLPHONE: usize = 50;
pub const MAX_LENGTH_CONTACT_LAST_NAME: usize = 127;
pub const MAX_LENGTH_CONTACT_INITIALS: usize = 50;
pub const MAX_LENGTH_CONTACT_FIRST_NAME: usize = 127;
pub const MAX_LENGTH_OPPORTUNITY_NAME: usize = 80;
pub const MAX_LENGTH_OPPORTUNITY_INSIGHTLY_STATE: usize = 4000;

static SPECIAL_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("static pattern is valid"));

/// A cleaned copy of a record together with the warnings produced while
/// cleaning it.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub record: T,
    pub warnings: Vec<String>,
}

impl<T> Validated<T> {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// All warnings as one newline-separated message, if there are any.
    pub fn message(&self) -> Option<String> {
        if self.warnings.is_empty() {
            None
        } else {
            Some(self.warnings.join("\n"))
        }
    }
}

/// Cut `value` to at most `max_length` bytes.
///
/// Returns the possibly shortened value and a warning when it was cut. A cut
/// that would split a UTF-8 sequence backs off to the previous boundary.
pub fn truncate_string(field_name: &str, value: &str, max_length: usize) -> (String, Option<String>) {
    if value.len() <= max_length {
        return (value.to_string(), None);
    }

    let mut cut = max_length;
    while !value.is_char_boundary(cut) {
        cut -= 1;
    }

    (
        value[..cut].to_string(),
        Some(format!("{} truncated to {} characters.", field_name, max_length)),
    )
}

/// Replace each of `\ / : * ? " < > |` with a dot.
pub fn remove_special_characters(value: &str) -> (String, Option<String>) {
    let removed = SPECIAL_CHARACTERS.find_iter(value).count();
    if removed == 0 {
        return (value.to_string(), None);
    }

    let cleaned = SPECIAL_CHARACTERS.replace_all(value, ".").into_owned();
    (
        cleaned,
        Some(format!(
            "{} special characters in '{}' replaced by a dot",
            removed, value
        )),
    )
}

fn truncate_in_place(field_name: &str, value: &mut String, max_length: usize, warnings: &mut Vec<String>) {
    let (cleaned, warning) = truncate_string(field_name, value, max_length);
    if let Some(warning) = warning {
        *value = cleaned;
        warnings.push(warning);
    }
}

fn sanitize_in_place(value: &mut String, warnings: &mut Vec<String>) {
    let (cleaned, warning) = remove_special_characters(value);
    if let Some(warning) = warning {
        *value = cleaned;
        warnings.push(warning);
    }
}

fn truncate_address(prefix: &str, address: &mut Address, warnings: &mut Vec<String>) {
    truncate_in_place(
        &format!("{}-HouseNumber", prefix),
        &mut address.house_number,
        MAX_LENGTH_ADDRESS_HOUSE_NUMBER,
        warnings,
    );
    truncate_in_place(&format!("{}-City", prefix), &mut address.city, MAX_LENGTH_ADDRESS_CITY, warnings);
    truncate_in_place(
        &format!("{}-ZipCode", prefix),
        &mut address.zip_code,
        MAX_LENGTH_ADDRESS_ZIP_CODE,
        warnings,
    );
    truncate_in_place(&format!("{}-Street", prefix), &mut address.street, MAX_LENGTH_ADDRESS_STREET, warnings);
}

pub fn validate_contact(contact: &Contact) -> Validated<Contact> {
    let mut record = contact.clone();
    let mut warnings = Vec::new();

    truncate_in_place("Phone", &mut record.phone, MAX_LENGTH_CONTACT_PHONE, &mut warnings);
    truncate_in_place("Email", &mut record.email, MAX_LENGTH_CONTACT_EMAIL, &mut warnings);
    truncate_in_place(
        "FunctionName",
        &mut record.function_name,
        MAX_LENGTH_CONTACT_FUNCTION_NAME,
        &mut warnings,
    );
    truncate_in_place("Cellphone", &mut record.cellphone, MAX_LENGTH_CONTACT_CELLPHONE, &mut warnings);
    truncate_in_place("LastName", &mut record.person.last_name, MAX_LENGTH_CONTACT_LAST_NAME, &mut warnings);
    truncate_in_place("Initials", &mut record.person.initials, MAX_LENGTH_CONTACT_INITIALS, &mut warnings);
    truncate_in_place(
        "FirstName",
        &mut record.person.first_name,
        MAX_LENGTH_CONTACT_FIRST_NAME,
        &mut warnings,
    );

    Validated { record, warnings }
}

pub fn validate_organization(organization: &Organization) -> Validated<Organization> {
    let mut record = organization.clone();
    let mut warnings = Vec::new();

    truncate_in_place(
        "EmailAddress",
        &mut record.email_address,
        MAX_LENGTH_ORGANIZATION_EMAIL,
        &mut warnings,
    );
    truncate_in_place(
        "OrganizationName",
        &mut record.organization_name,
        MAX_LENGTH_ORGANIZATION_NAME,
        &mut warnings,
    );
    truncate_in_place("Phone", &mut record.phone, MAX_LENGTH_ORGANIZATION_PHONE, &mut warnings);
    truncate_in_place("Website", &mut record.website, MAX_LENGTH_ORGANIZATION_WEBSITE, &mut warnings);

    truncate_address("BillingAddress", &mut record.billing_address, &mut warnings);
    truncate_address("ShippingAddress", &mut record.shipping_address, &mut warnings);

    sanitize_in_place(&mut record.organization_name, &mut warnings);

    Validated { record, warnings }
}

pub fn validate_opportunity(opportunity: &Opportunity) -> Validated<Opportunity> {
    let mut record = opportunity.clone();
    let mut warnings = Vec::new();

    truncate_in_place(
        "OpportunityName",
        &mut record.opportunity_name,
        MAX_LENGTH_OPPORTUNITY_NAME,
        &mut warnings,
    );
    truncate_in_place(
        "InsightlyState",
        &mut record.insightly_state,
        MAX_LENGTH_OPPORTUNITY_INSIGHTLY_STATE,
        &mut warnings,
    );

    sanitize_in_place(&mut record.opportunity_name, &mut warnings);

    Validated { record, warnings }
}
