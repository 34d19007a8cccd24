//! Fetches a single record from Ridder and prints it as JSON.
//!
//! Usage: `ridder_probe <contact|organization|opportunity> <ridder-id>`

use ridder_client::{RidderService, ServiceConfig};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ridder_client=info,ridder_probe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (resource, ridder_id) = parse_args(&args)?;

    let config = ServiceConfig::from_env()?;
    let service = RidderService::new(&config)?;

    let record = match resource {
        Resource::Contact => serde_json::to_value(service.get_contact(ridder_id).await?)?,
        Resource::Organization => serde_json::to_value(service.get_organization(ridder_id).await?)?,
        Resource::Opportunity => serde_json::to_value(service.get_opportunity(ridder_id).await?)?,
    };

    println!("{}", serde_json::to_string_pretty(&record)?);
    tracing::info!("{} API calls made", service.api_call_count());

    Ok(())
}

const USAGE: &str = "usage: ridder_probe <contact|organization|opportunity> <ridder-id>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Contact,
    Organization,
    Opportunity,
}

/// Splits the arguments after the program name into resource and id.
fn parse_args(args: &[String]) -> anyhow::Result<(Resource, i32)> {
    let [resource, id] = args else {
        anyhow::bail!(USAGE);
    };
    let resource = match resource.as_str() {
        "contact" => Resource::Contact,
        "organization" => Resource::Organization,
        "opportunity" => Resource::Opportunity,
        other => anyhow::bail!("unknown resource '{}'", other),
    };
    let ridder_id = id
        .parse()
        .map_err(|_| anyhow::anyhow!("ridder-id must be a number, got '{}'", id))?;
    Ok((resource, ridder_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let (resource, id) = parse_args(&args(&["opportunity", "301"])).unwrap();
        assert_eq!(resource, Resource::Opportunity);
        assert_eq!(id, 301);
    }

    #[test]
    fn test_parse_args_without_arguments_reports_usage() {
        let err = parse_args(&[]).unwrap_err();
        assert_eq!(err.to_string(), USAGE);

        let err = parse_args(&args(&["contact"])).unwrap_err();
        assert_eq!(err.to_string(), USAGE);
    }

    #[test]
    fn test_parse_args_rejects_bad_values() {
        let err = parse_args(&args(&["invoice", "1"])).unwrap_err();
        assert_eq!(err.to_string(), "unknown resource 'invoice'");

        let err = parse_args(&args(&["contact", "abc"])).unwrap_err();
        assert_eq!(err.to_string(), "ridder-id must be a number, got 'abc'");
    }
}
