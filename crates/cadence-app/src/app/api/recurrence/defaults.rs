use cadence_rule::recur::{RuleDraft, summarize};
use salvo::{handler, writing::Json};

use super::types::RuleResponse;

/// ## Summary
/// GET /recurrence/default - The rule a fresh picker starts from.
///
/// Seeded from the server's current local date.
#[handler]
pub async fn default_rule() -> Json<RuleResponse> {
    let today = chrono::Local::now().date_naive();
    let rule = RuleDraft::new(today).into_rule();
    tracing::debug!(today = %today, "Serving default recurrence rule");

    Json(RuleResponse {
        summary: summarize(&rule),
        rule,
    })
}
