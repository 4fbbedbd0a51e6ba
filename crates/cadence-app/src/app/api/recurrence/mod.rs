// Recurrence preview API handlers.

use salvo::{Response, Router, http::StatusCode, writing::Json};

use crate::app::api::RECURRENCE_ROUTE_COMPONENT;

mod defaults;
mod expand;
mod preview;
pub mod types;

#[cfg(test)]
mod expand_tests;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(RECURRENCE_ROUTE_COMPONENT)
        .push(Router::with_path("default").get(defaults::default_rule))
        .push(Router::with_path("expand").post(expand::expand_rule))
        .push(Router::with_path("preview").post(preview::preview_month))
}

/// ## Summary
/// Writes a JSON error body with the given status.
fn render_error(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    res.status_code(status);
    res.render(Json(types::ErrorResponse {
        error: message.into(),
    }));
}
