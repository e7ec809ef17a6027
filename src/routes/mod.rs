/// Application routes configuration
use crate::handlers::{
    get_launch_sites, get_nationality_distribution, get_preferences, get_summary,
    get_top_missions, health, post_launch_table, put_preferences, AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Site selector
        .route("/sites", get(get_launch_sites))
        // Widget aggregates
        .route("/widgets/nationality", get(get_nationality_distribution))
        .route("/widgets/top-missions", get(get_top_missions))
        .route("/widgets/summary", get(get_summary))
        // Launch data table (legacy path kept for wire compatibility)
        .route("/api/allLaunchesTableData", post(post_launch_table))
        // Display preferences
        .route("/preferences", get(get_preferences).put(put_preferences))
        .with_state(state)
}
