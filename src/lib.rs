//! Ridder ERP API client library
//!
//! Typed create/read/update access to Ridder contacts, organizations and
//! opportunities. Records are cleaned before they are sent: over-long fields
//! are truncated to Ridder's column sizes and names lose characters Ridder
//! rejects. Cleaning never fails a call; it is reported to a `WarningSink`.
//!
//! # Modules
//!
//! - `config`: Service configuration and environment loading.
//! - `contacts`, `organizations`, `opportunities`: Resource operations.
//! - `diagnostics`: Validation events and sinks.
//! - `errors`: Error handling types.
//! - `models`: Ridder data models.
//! - `sanitize`: Field truncation and special-character replacement.
//! - `service`: `RidderService` and the URL builder.
//! - `transport`: reqwest-backed HTTP transport.

pub mod config;
pub mod contacts;
pub mod diagnostics;
pub mod errors;
pub mod models;
pub mod opportunities;
pub mod organizations;
pub mod sanitize;
pub mod service;
pub mod transport;

pub use config::ServiceConfig;
pub use diagnostics::{TracingSink, ValidationEvent, WarningSink};
pub use errors::RidderError;
pub use models::{
    Address, Contact, ErrorResponse, Opportunity, OpportunityResponse, Organization, Person,
    Workflow,
};
pub use sanitize::Validated;
pub use service::RidderService;
