/// External API clients module
use crate::domain::{Launch, Launchpad, Mission, Payload};
use crate::errors::{ApiError, ApiResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("launch-dashboard-service/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// The three raw collections every aggregate widget queries
#[derive(Debug, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub launches: Vec<Launch>,
    #[serde(default)]
    pub missions: Vec<Mission>,
    #[serde(default)]
    pub payloads: Vec<Payload>,
}

#[derive(Debug, Deserialize)]
struct LaunchpadsData {
    #[serde(default)]
    launchpads: Vec<Launchpad>,
}

#[derive(Debug, Deserialize)]
struct LaunchesData {
    #[serde(default)]
    launches: Vec<Launch>,
}

const LAUNCH_SITES_QUERY: &str = r#"
    query GetLaunchSites {
        launchpads {
            id
            name
        }
    }
"#;

const NATIONALITY_QUERY: &str = r#"
    query GetPayloadCountByNationalityData($selectedLaunchpadID: String) {
        launches(find: {site_id: $selectedLaunchpadID}) {
            launch_site {
                site_id
            }
            mission_id
        }
        missions {
            payloads {
                id
            }
            id
        }
        payloads {
            id
            nationality
        }
    }
"#;

const SUMMARY_QUERY: &str = r#"
    query GetLaunchSummaryData($selectedLaunchpadID: String) {
        launches(find: {site_id: $selectedLaunchpadID}) {
            launch_site {
                site_id
            }
            mission_id
        }
        missions {
            payloads {
                id
            }
            id
        }
        payloads {
            customers
            id
            payload_mass_kg
        }
    }
"#;

const TOP_MISSIONS_QUERY: &str = r#"
    query GetTopFiveMissionsData($selectedLaunchpadID: String) {
        launches(find: {site_id: $selectedLaunchpadID}) {
            launch_site {
                site_id
            }
            mission_id
        }
        missions {
            payloads {
                id
            }
            id
            name
        }
        payloads {
            id
            payload_mass_kg
        }
    }
"#;

const LAUNCH_TABLE_QUERY: &str = r#"
    query GetLaunchData($selectedLaunchpadID: String, $searchedMissionName: String) {
        launches(find: {site_id: $selectedLaunchpadID, mission_name: $searchedMissionName}) {
            launch_site {
                site_id
                site_name
            }
            mission_id
            launch_date_unix
            launch_success
            mission_name
            rocket {
                rocket_name
                rocket {
                    payload_weights {
                        kg
                    }
                }
            }
        }
    }
"#;

/// Client for the upstream SpaceX GraphQL endpoint.
///
/// Each widget requests only the fields it consumes, so the queries are
/// kept separate rather than merged into one catch-all document.
pub struct SpaceXGraphQlClient {
    http_client: HttpClient,
    endpoint: String,
}

impl SpaceXGraphQlClient {
    pub fn new(endpoint: String, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            endpoint,
        })
    }

    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> ApiResult<T> {
        let resp = self
            .http_client
            .get_client()
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ApiError::Internal(format!(
                "GraphQL request failed with status {}",
                resp.status()
            )));
        }

        let envelope: GraphQlResponse<T> = resp.json().await?;

        if let Some(errors) = envelope.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQl(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::GraphQl("response carried no data".to_string()))
    }

    /// Fetch the launch site list for the site selector
    pub async fn fetch_launch_sites(&self) -> ApiResult<Vec<Launchpad>> {
        let data: LaunchpadsData = self.query(LAUNCH_SITES_QUERY, json!({})).await?;
        Ok(data.launchpads)
    }

    /// Fetch the collections behind the nationality distribution widget
    pub async fn fetch_nationality_data(&self, site_id: Option<&str>) -> ApiResult<DashboardData> {
        self.query(
            NATIONALITY_QUERY,
            json!({ "selectedLaunchpadID": site_id }),
        )
        .await
    }

    /// Fetch the collections behind the summary cards
    pub async fn fetch_summary_data(&self, site_id: Option<&str>) -> ApiResult<DashboardData> {
        self.query(SUMMARY_QUERY, json!({ "selectedLaunchpadID": site_id }))
            .await
    }

    /// Fetch the collections behind the top-missions widget
    pub async fn fetch_top_missions_data(&self, site_id: Option<&str>) -> ApiResult<DashboardData> {
        self.query(
            TOP_MISSIONS_QUERY,
            json!({ "selectedLaunchpadID": site_id }),
        )
        .await
    }

    /// Fetch launches for the launch data table, optionally narrowed by a
    /// mission-name substring
    pub async fn fetch_table_launches(
        &self,
        site_id: Option<&str>,
        mission_name: Option<&str>,
    ) -> ApiResult<Vec<Launch>> {
        let data: LaunchesData = self
            .query(
                LAUNCH_TABLE_QUERY,
                json!({
                    "selectedLaunchpadID": site_id,
                    "searchedMissionName": mission_name,
                }),
            )
            .await?;
        Ok(data.launches)
    }
}
