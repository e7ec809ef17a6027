/// Business logic services layer
use crate::aggregate;
use crate::clients::SpaceXGraphQlClient;
use crate::domain::{
    Launchpad, LaunchRow, LaunchSummary, MissionMass, NationalitySlice, SortColumn,
};
use crate::errors::{ApiError, ApiResult};
use serde::Deserialize;

/// Request body of the launch table endpoint. Field names follow the wire
/// contract of the dashboard this service replaces. The sort column arrives
/// as a free-form string so an unknown column surfaces as an invalid-input
/// error rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRequest {
    #[serde(rename = "selectedLaunchpadID", default)]
    pub selected_launchpad_id: Option<String>,
    #[serde(default)]
    pub searched_mission_name: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default = "default_sort_column")]
    pub sort_column: String,
    #[serde(default)]
    pub sort_descending: bool,
}

fn default_sort_column() -> String {
    "launch_date_unix".to_string()
}

impl TableRequest {
    /// Validate the requested sort column
    pub fn sort_column(&self) -> ApiResult<SortColumn> {
        SortColumn::parse(&self.sort_column).ok_or_else(|| {
            ApiError::InvalidInput(format!("unknown sort column: {}", self.sort_column))
        })
    }
}

/// Dashboard aggregation service: issues the per-widget queries and runs
/// the shared join-and-aggregate pipeline over the results.
pub struct DashboardService {
    client: SpaceXGraphQlClient,
}

impl DashboardService {
    pub fn new(client: SpaceXGraphQlClient) -> Self {
        Self { client }
    }

    /// Launch sites for the selector: the "All Launch Sites" sentinel
    /// followed by the upstream launchpad list
    pub async fn launch_sites(&self) -> ApiResult<Vec<Launchpad>> {
        let mut sites = vec![Launchpad::all()];
        sites.extend(self.client.fetch_launch_sites().await?);
        Ok(sites)
    }

    /// Payload count by nationality for the selected site. `None` means the
    /// site has no launch data at all, as opposed to an empty distribution.
    pub async fn nationality_distribution(
        &self,
        site_id: &str,
    ) -> ApiResult<Option<Vec<NationalitySlice>>> {
        let site = aggregate::effective_site_id(site_id);
        let data = self.client.fetch_nationality_data(site).await?;
        if data.launches.is_empty() {
            return Ok(None);
        }
        let joined = aggregate::joined_payloads(&data.launches, &data.missions, &data.payloads);
        Ok(Some(aggregate::nationality_distribution(&joined)))
    }

    /// Top missions by payload mass for the selected site
    pub async fn top_missions(&self, site_id: &str) -> ApiResult<Option<Vec<MissionMass>>> {
        let site = aggregate::effective_site_id(site_id);
        let data = self.client.fetch_top_missions_data(site).await?;
        if data.launches.is_empty() {
            return Ok(None);
        }
        Ok(Some(aggregate::top_missions_by_mass(
            &data.launches,
            &data.missions,
            &data.payloads,
        )))
    }

    /// Summary card totals for the selected site. A site with no launches
    /// reports an all-zero summary rather than "no data".
    pub async fn summary(&self, site_id: &str) -> ApiResult<LaunchSummary> {
        let site = aggregate::effective_site_id(site_id);
        let data = self.client.fetch_summary_data(site).await?;
        if data.launches.is_empty() {
            return Ok(LaunchSummary {
                total_payloads: 0,
                avg_payload_mass_kg: None,
                unique_customer_count: 0,
            });
        }
        let joined = aggregate::joined_payloads(&data.launches, &data.missions, &data.payloads);
        Ok(aggregate::payload_summary(&joined))
    }

    /// Launch table rows: fetch, flatten, sort, paginate
    pub async fn launch_table(&self, request: &TableRequest) -> ApiResult<Vec<LaunchRow>> {
        let sort_column = request.sort_column()?;
        let site = request
            .selected_launchpad_id
            .as_deref()
            .and_then(aggregate::effective_site_id);

        let launches = self
            .client
            .fetch_table_launches(site, request.searched_mission_name.as_deref())
            .await?;

        let mut rows = aggregate::build_launch_rows(&launches);
        aggregate::sort_launch_rows(&mut rows, sort_column, request.sort_descending);
        Ok(aggregate::paginate(rows, request.offset, request.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_request_deserializes_legacy_wire_body() {
        let body = json!({
            "selectedLaunchpadID": "ccafs_slc_40",
            "searchedMissionName": "CRS",
            "limit": 10,
            "offset": 0,
            "sortColumn": "launch_date_unix",
            "sortDescending": true
        });

        let request: TableRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.selected_launchpad_id.as_deref(), Some("ccafs_slc_40"));
        assert_eq!(request.searched_mission_name.as_deref(), Some("CRS"));
        assert_eq!(request.limit, Some(10));
        assert_eq!(request.offset, Some(0));
        assert_eq!(request.sort_column().unwrap(), SortColumn::LaunchDateUnix);
        assert!(request.sort_descending);
    }

    #[test]
    fn test_table_request_defaults_when_fields_absent() {
        let request: TableRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.selected_launchpad_id, None);
        assert_eq!(request.searched_mission_name, None);
        assert_eq!(request.limit, None);
        assert_eq!(request.offset, None);
        assert_eq!(request.sort_column().unwrap(), SortColumn::LaunchDateUnix);
        assert!(!request.sort_descending);
    }

    #[test]
    fn test_unknown_sort_column_maps_to_invalid_input() {
        let request: TableRequest =
            serde_json::from_value(json!({ "sortColumn": "not_a_column" })).unwrap();
        let err = request.sort_column().unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(err.to_string().contains("not_a_column"));
    }

    #[test]
    fn test_every_table_column_name_resolves() {
        for (name, column) in [
            ("mission_name", SortColumn::MissionName),
            ("launch_date_unix", SortColumn::LaunchDateUnix),
            ("launch_success", SortColumn::LaunchSuccess),
            ("rocket_name", SortColumn::RocketName),
            ("kg", SortColumn::Kg),
            ("site_name", SortColumn::SiteName),
            ("mission_id", SortColumn::MissionId),
        ] {
            assert_eq!(SortColumn::parse(name), Some(column));
        }
    }
}
