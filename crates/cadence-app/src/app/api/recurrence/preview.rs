use cadence_rule::recur::{MonthGrid, MonthView, OccurrenceSet, expand_with_limit, summarize};
use salvo::{Depot, Request, Response, handler, http::StatusCode, writing::Json};
use tracing::error;

use super::render_error;
use super::types::{PreviewRequest, PreviewResponse};
use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};

/// Picks the month to display for a preview request.
fn resolve_view(request: &PreviewRequest) -> AppResult<MonthView> {
    let view = match (request.year, request.month0) {
        (Some(year), Some(month0)) => MonthView::new(year, month0)?,
        _ => MonthView::containing(request.rule.start_date),
    };
    Ok(view.shift(request.offset))
}

/// ## Summary
/// POST /recurrence/preview - Month calendar with the rule's dates marked.
///
/// ## Errors
/// Returns HTTP 400 if the body is invalid, the month is out of range, or the end date precedes the start
/// Returns HTTP 500 if the configuration is missing from the depot
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn preview_month(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let settings = match get_config_from_depot(depot) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = ?e, "Failed to get configuration");
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            return;
        }
    };

    let request: PreviewRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse preview request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };

    let view = match request
        .rule
        .validate()
        .map_err(AppError::from)
        .and_then(|()| resolve_view(&request))
    {
        Ok(view) => view,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting preview request");
            render_error(res, StatusCode::BAD_REQUEST, e.to_string());
            return;
        }
    };

    let expansion = expand_with_limit(&request.rule, settings.preview.max_count);
    let occurrences: OccurrenceSet = expansion.dates.iter().collect();

    res.render(Json(PreviewResponse {
        summary: summarize(&request.rule),
        occurrence_count: occurrences.len(),
        grid: MonthGrid::build(view, &occurrences),
    }));
}
