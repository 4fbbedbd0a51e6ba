//! Unit tests for the recurrence expand and default handlers.

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use salvo::prelude::*;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};

    use crate::app::api::RECURRENCE_ROUTE_PREFIX;
    use crate::app::api::routes;
    use crate::config::ConfigHandler;
    use crate::config::tests::test_settings;

    fn service(max_count: usize) -> Service {
        Service::new(
            Router::new()
                .hoop(ConfigHandler {
                    settings: test_settings(max_count),
                })
                .push(routes()),
        )
    }

    fn expand_url() -> String {
        format!("http://127.0.0.1:5800{RECURRENCE_ROUTE_PREFIX}/expand")
    }

    fn daily_rule() -> Value {
        json!({
            "frequency": "daily",
            "interval": 1,
            "monthly_mode": {"type": "day_of_month", "day": 1},
            "start_date": "2024-01-01",
        })
    }

    #[test_log::test(tokio::test)]
    async fn test_expand_weekly_rule() {
        let body = json!({
            "rule": {
                "frequency": "weekly",
                "interval": 1,
                "days_of_week": [3, 1],
                "monthly_mode": {"type": "day_of_month", "day": 1},
                "start_date": "2024-01-01",
                "end_date": "2024-01-14",
            }
        });

        let mut resp = TestClient::post(expand_url())
            .json(&body)
            .send(&service(100))
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
        let value: Value = resp.take_json().await.expect("json body");
        assert_eq!(
            value["dates"],
            json!(["2024-01-01", "2024-01-03", "2024-01-08", "2024-01-10"])
        );
        assert_eq!(value["truncated"], json!(false));
        assert_eq!(value["summary"], json!("Every week on Mon, Wed"));
        assert_eq!(value["rrule"], json!("FREQ=WEEKLY;BYDAY=MO,WE;WKST=MO;UNTIL=20240114"));
    }

    #[tokio::test]
    async fn test_expand_respects_configured_limit() {
        let mut resp = TestClient::post(expand_url())
            .json(&json!({ "rule": daily_rule() }))
            .send(&service(5))
            .await;

        let value: Value = resp.take_json().await.expect("json body");
        assert_eq!(value["dates"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["dates"][4], json!("2024-01-05"));
        assert_eq!(value["truncated"], json!(true));
    }

    #[tokio::test]
    async fn test_expand_request_limit_cannot_exceed_config() {
        let mut resp = TestClient::post(expand_url())
            .json(&json!({ "rule": daily_rule(), "limit": 3 }))
            .send(&service(10))
            .await;
        let value: Value = resp.take_json().await.expect("json body");
        assert_eq!(value["dates"].as_array().map(Vec::len), Some(3));

        let mut resp = TestClient::post(expand_url())
            .json(&json!({ "rule": daily_rule(), "limit": 50 }))
            .send(&service(10))
            .await;
        let value: Value = resp.take_json().await.expect("json body");
        assert_eq!(value["dates"].as_array().map(Vec::len), Some(10));
    }

    #[tokio::test]
    async fn test_expand_empty_weekly_has_no_rrule() {
        let body = json!({
            "rule": {
                "frequency": "weekly",
                "interval": 1,
                "days_of_week": [],
                "monthly_mode": {"type": "day_of_month", "day": 1},
                "start_date": "2024-01-01",
            }
        });

        let mut resp = TestClient::post(expand_url())
            .json(&body)
            .send(&service(100))
            .await;

        let value: Value = resp.take_json().await.expect("json body");
        assert_eq!(value["dates"], json!([]));
        assert_eq!(value["rrule"], Value::Null);
        assert_eq!(value["summary"], json!("Every week"));
    }

    #[tokio::test]
    async fn test_expand_rejects_end_before_start() {
        let mut rule = daily_rule();
        rule["end_date"] = json!("2023-12-31");

        let mut resp = TestClient::post(expand_url())
            .json(&json!({ "rule": rule }))
            .send(&service(100))
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
        let value: Value = resp.take_json().await.expect("json body");
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn test_expand_rejects_malformed_rule() {
        let mut rule = daily_rule();
        rule["interval"] = json!(0);

        let mut resp = TestClient::post(expand_url())
            .json(&json!({ "rule": rule }))
            .send(&service(100))
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
        let value: Value = resp.take_json().await.expect("json body");
        assert_eq!(value["error"], json!("Invalid request body"));
    }

    #[tokio::test]
    async fn test_expand_without_config_is_server_error() {
        let service = Service::new(Router::new().push(routes()));

        let resp = TestClient::post(expand_url())
            .json(&json!({ "rule": daily_rule() }))
            .send(&service)
            .await;

        assert_eq!(resp.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_default_rule_is_weekly_on_today() {
        let mut resp = TestClient::get(format!(
            "http://127.0.0.1:5800{RECURRENCE_ROUTE_PREFIX}/default"
        ))
        .send(&service(100))
        .await;

        assert_eq!(resp.status_code, Some(StatusCode::OK));
        let value: Value = resp.take_json().await.expect("json body");
        assert_eq!(value["rule"]["frequency"], json!("weekly"));
        assert_eq!(value["rule"]["interval"], json!(1));
        assert_eq!(value["rule"]["days_of_week"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["rule"]["end_date"], Value::Null);
        let summary = value["summary"].as_str().unwrap_or_default();
        assert!(summary.starts_with("Every week on "), "{summary}");
    }
}
