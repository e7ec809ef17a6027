/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel launchpad id meaning "no site filter"
pub const LAUNCHPAD_ALL_ID: &str = "custom_all";
pub const LAUNCHPAD_ALL_NAME: &str = "All Launch Sites";

/// A launch site as embedded in a launch record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSite {
    pub site_id: Option<String>,
    pub site_name: Option<String>,
}

/// A single payload weight entry on a rocket spec
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadWeight {
    pub kg: Option<f64>,
}

/// Nested rocket spec carrying payload weight entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketSpec {
    #[serde(default)]
    pub payload_weights: Vec<PayloadWeight>,
}

/// Rocket info attached to a launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRocket {
    pub rocket_name: Option<String>,
    pub rocket: Option<RocketSpec>,
}

/// A single flight event record from the upstream API.
///
/// `mission_id` is an array upstream although it only ever seems to hold
/// zero or one entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launch {
    pub launch_site: Option<LaunchSite>,
    #[serde(default)]
    pub mission_id: Vec<String>,
    pub launch_date_unix: Option<i64>,
    pub launch_success: Option<bool>,
    pub mission_name: Option<String>,
    pub rocket: Option<LaunchRocket>,
}

/// Payload reference carried inside a mission record; only the id is
/// requested. Entries may be null upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadRef {
    pub id: Option<String>,
}

/// A named grouping of payloads, referenced by id from launches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub payloads: Vec<Option<PayloadRef>>,
}

/// A single cargo item with mass, nationality and customer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    pub id: Option<String>,
    pub customers: Option<Vec<String>>,
    pub payload_mass_kg: Option<f64>,
    pub nationality: Option<String>,
}

/// A physical launch location, as listed by the site selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launchpad {
    pub id: String,
    pub name: Option<String>,
}

impl Launchpad {
    /// The synthetic "All Launch Sites" entry
    pub fn all() -> Self {
        Self {
            id: LAUNCHPAD_ALL_ID.to_string(),
            name: Some(LAUNCHPAD_ALL_NAME.to_string()),
        }
    }
}

/// One slice of the payload-count-by-nationality distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationalitySlice {
    pub title: String,
    pub value: u64,
    pub color: String,
}

/// One row of the top-5-missions-by-payload-mass table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionMass {
    pub title: String,
    pub mass_kg: f64,
    /// Relative bar width, `mass_kg / max(mass_kg over shown rows)`
    pub bar_fraction: f64,
}

/// Summary card totals over the filtered payloads
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchSummary {
    pub total_payloads: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_payload_mass_kg: Option<f64>,
    pub unique_customer_count: u64,
}

/// One row of the launch data table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRow {
    pub mission_name: String,
    pub launch_date_unix: i64,
    pub launch_success: bool,
    pub rocket_name: String,
    pub kg: f64,
    pub site_name: String,
    pub mission_id: String,
}

/// Sortable columns of the launch table, named by their row keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    MissionName,
    #[default]
    LaunchDateUnix,
    LaunchSuccess,
    RocketName,
    Kg,
    SiteName,
    MissionId,
}

impl SortColumn {
    /// Resolve a wire column name; `None` for an unrecognized column
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "mission_name" => Some(Self::MissionName),
            "launch_date_unix" => Some(Self::LaunchDateUnix),
            "launch_success" => Some(Self::LaunchSuccess),
            "rocket_name" => Some(Self::RocketName),
            "kg" => Some(Self::Kg),
            "site_name" => Some(Self::SiteName),
            "mission_id" => Some(Self::MissionId),
            _ => None,
        }
    }
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
