//! Catch-all identification response.
//!
//! Every request that no other route claims gets the same line naming the
//! service this stub stands in for, whatever the method or path depth.

use axum::extract::State;

use crate::state::AppState;

/// Greeting handler, status 200.
pub async fn greeting(State(state): State<AppState>) -> String {
    greeting_body(&state.app_name)
}

pub fn greeting_body(app_name: &str) -> String {
    format!("stub container for {} service\n", app_name)
}
