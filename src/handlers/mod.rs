/// HTTP request handlers
use crate::domain::{Health, LaunchRow, LaunchSummary, Launchpad, NationalitySlice, LAUNCHPAD_ALL_ID};
use crate::errors::ApiError;
use crate::prefs::{DisplayPreferences, PrefsStore};
use crate::services::{DashboardService, TableRequest};
use crate::aggregate::NATIONALITY_TABLE_CAP;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: Arc<DashboardService>,
    pub prefs_store: Arc<PrefsStore>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Launch table endpoint response. The shape (`data`/`status`/`endpoint`)
/// is the wire contract of the dashboard this service replaces.
#[derive(Serialize)]
pub struct TableResponse {
    pub data: Vec<LaunchRow>,
    pub status: &'static str,
    pub endpoint: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Serialize)]
pub struct SitesResponse {
    pub sites: Vec<Launchpad>,
}

#[derive(Serialize)]
pub struct NationalityResponse {
    /// Full distribution, as rendered by the pie chart
    pub slices: Vec<NationalitySlice>,
    /// Top entries only, as rendered by the accompanying table
    pub table: Vec<NationalitySlice>,
}

#[derive(Serialize)]
pub struct TopMissionsResponse {
    pub missions: Vec<crate::domain::MissionMass>,
}

fn selected_site(params: &HashMap<String, String>) -> String {
    params
        .get("site")
        .cloned()
        .unwrap_or_else(|| LAUNCHPAD_ALL_ID.to_string())
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// List launch sites for the site selector
pub async fn get_launch_sites(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<SitesResponse>>, ApiError> {
    let sites = state.dashboard_service.launch_sites().await.map_err(|e| {
        error!("launch sites query failed: {}", e);
        e
    })?;
    Ok(Json(SuccessResponse::new(SitesResponse { sites })))
}

/// Payload count by nationality for the selected site
pub async fn get_nationality_distribution(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let site = selected_site(&params);
    let distribution = state
        .dashboard_service
        .nationality_distribution(&site)
        .await
        .map_err(|e| {
            error!("nationality query failed for site {}: {}", site, e);
            e
        })?;

    match distribution {
        Some(slices) => {
            let table: Vec<NationalitySlice> =
                slices.iter().take(NATIONALITY_TABLE_CAP).cloned().collect();
            Ok(Json(serde_json::json!(SuccessResponse::new(
                NationalityResponse { slices, table }
            ))))
        }
        None => Ok(Json(serde_json::json!(SuccessResponse::new(
            serde_json::json!({ "message": "no data" })
        )))),
    }
}

/// Top missions by payload mass for the selected site
pub async fn get_top_missions(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let site = selected_site(&params);
    let missions = state
        .dashboard_service
        .top_missions(&site)
        .await
        .map_err(|e| {
            error!("top missions query failed for site {}: {}", site, e);
            e
        })?;

    match missions {
        Some(missions) => Ok(Json(serde_json::json!(SuccessResponse::new(
            TopMissionsResponse { missions }
        )))),
        None => Ok(Json(serde_json::json!(SuccessResponse::new(
            serde_json::json!({ "message": "no data" })
        )))),
    }
}

/// Summary card totals for the selected site
pub async fn get_summary(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<LaunchSummary>>, ApiError> {
    let site = selected_site(&params);
    let summary = state.dashboard_service.summary(&site).await.map_err(|e| {
        error!("summary query failed for site {}: {}", site, e);
        e
    })?;
    Ok(Json(SuccessResponse::new(summary)))
}

/// Launch data table: filter, flatten, sort, paginate
pub async fn post_launch_table(
    State(state): State<AppState>,
    Json(request): Json<TableRequest>,
) -> Result<Json<TableResponse>, ApiError> {
    let rows = state
        .dashboard_service
        .launch_table(&request)
        .await
        .map_err(|e| {
            error!("launch table query failed: {}", e);
            e
        })?;

    let message = rows
        .is_empty()
        .then(|| crate::aggregate::empty_state_message(request.searched_mission_name.as_deref()));

    Ok(Json(TableResponse {
        data: rows,
        status: "ok",
        endpoint: "/api/allLaunchesTableData",
        message,
    }))
}

/// Read current display preferences
pub async fn get_preferences(
    State(state): State<AppState>,
) -> Json<SuccessResponse<DisplayPreferences>> {
    Json(SuccessResponse::new(state.prefs_store.get()))
}

/// Replace display preferences
pub async fn put_preferences(
    State(state): State<AppState>,
    Json(prefs): Json<DisplayPreferences>,
) -> Result<Json<SuccessResponse<DisplayPreferences>>, ApiError> {
    let saved = state.prefs_store.set(prefs).map_err(|e| {
        error!("failed to persist preferences: {}", e);
        e
    })?;
    Ok(Json(SuccessResponse::new(saved)))
}
