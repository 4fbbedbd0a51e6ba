use cadence_rule::recur::{expand_with_limit, ical::to_rrule, summarize};
use salvo::{Depot, Request, Response, handler, http::StatusCode, writing::Json};
use tracing::error;

use super::render_error;
use super::types::{ExpandRequest, ExpandResponse};
use crate::config::get_config_from_depot;

/// ## Summary
/// POST /recurrence/expand - Expands a rule into its upcoming dates.
///
/// The number of dates is bounded by the request's `limit`, the configured
/// preview limit and the engine's own cap, whichever is smallest.
///
/// ## Errors
/// Returns HTTP 400 if the body is not a valid rule or its end date precedes the start
/// Returns HTTP 500 if the configuration is missing from the depot
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn expand_rule(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let settings = match get_config_from_depot(depot) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = ?e, "Failed to get configuration");
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            return;
        }
    };

    let request: ExpandRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse expand request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };

    if let Err(e) = request.rule.validate() {
        tracing::debug!(error = %e, "Rejecting invalid recurrence rule");
        render_error(res, StatusCode::BAD_REQUEST, e.to_string());
        return;
    }

    let limit = request
        .limit
        .map_or(settings.preview.max_count, |limit| {
            limit.min(settings.preview.max_count)
        });
    let expansion = expand_with_limit(&request.rule, limit);

    res.render(Json(ExpandResponse {
        dates: expansion.dates,
        truncated: expansion.truncated,
        summary: summarize(&request.rule),
        rrule: to_rrule(&request.rule),
    }));
}
