//! # HTTP Flows
//!
//! Drives the assembled router in process, exactly as the node serves it.

#[cfg(test)]
mod tests {
    use super::super::{authorized, json_body, TOKEN};
    use axum::http::{header, Method, StatusCode};
    use axum::Router;
    use chrono::Duration;
    use ledger_node::{LedgerNode, NodeConfig};
    use ol_01_domain_ledger::test_utils::ManualTimeSource;
    use ol_01_domain_ledger::{shared_store, InMemoryKVStore, KeyLayout, LedgerRegistry, TimeSource};
    use ol_02_request_router::build_router;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn node_config() -> NodeConfig {
        let mut config = NodeConfig::default();
        config.router.auth.api_token = Some(TOKEN.to_string());
        config
    }

    fn node_router() -> Router {
        LedgerNode::new(node_config()).unwrap().router().router()
    }

    #[tokio::test]
    async fn test_offer_round_trip_through_node() {
        let app = node_router();

        let resp = app
            .clone()
            .oneshot(authorized(
                Method::POST,
                "/?domain=example.com",
                r#"{"email":"a@b.com","amount":500,"description":"first"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let created = json_body(resp).await;
        assert_eq!(created["domain"], "example.com");
        assert_eq!(created["totalOffers"], 1);
        assert_eq!(created["offer"]["amount"], 500);
        assert_eq!(created["offer"]["description"], "first");

        let resp = app
            .oneshot(authorized(Method::GET, "/?domain=example.com", ""))
            .await
            .unwrap();
        let listed = json_body(resp).await;
        assert_eq!(listed["offers"], json!([created["offer"].clone()]));
    }

    #[tokio::test]
    async fn test_timestamps_follow_submission_order() {
        let clock = Arc::new(ManualTimeSource::at_epoch());
        let registry = Arc::new(LedgerRegistry::new(
            shared_store(InMemoryKVStore::new()),
            Arc::clone(&clock) as Arc<dyn TimeSource>,
            KeyLayout::Separate,
        ));
        let app = build_router(&node_config().router, registry).unwrap();

        for (i, step) in [0, 250, 1_000].into_iter().enumerate() {
            clock.advance(Duration::milliseconds(step));
            let body = json!({ "email": format!("{}@b.com", i), "amount": i + 1 }).to_string();
            let resp = app
                .clone()
                .oneshot(authorized(Method::POST, "/?domain=example.com", &body))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = app
            .oneshot(authorized(Method::GET, "/?domain=example.com", ""))
            .await
            .unwrap();
        let listed = json_body(resp).await;
        let stamps: Vec<&str> = listed["offers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["timestamp"].as_str().unwrap())
            .collect();
        assert_eq!(
            stamps,
            vec![
                "2024-01-01T00:00:00.000Z",
                "2024-01-01T00:00:00.250Z",
                "2024-01-01T00:00:01.250Z",
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_posts_are_not_lost() {
        let app = node_router();
        let submissions = 50;

        let tasks: Vec<_> = (0..submissions)
            .map(|i| {
                let app = app.clone();
                tokio::spawn(async move {
                    let body = json!({ "email": format!("{}@b.com", i), "amount": 1 }).to_string();
                    let resp = app
                        .clone()
                        .oneshot(authorized(Method::POST, "/?domain=example.com", &body))
                        .await
                        .unwrap();
                    assert_eq!(resp.status(), StatusCode::OK);

                    let resp = app
                        .oneshot(authorized(Method::POST, "/requests?domain=example.com", ""))
                        .await
                        .unwrap();
                    assert_eq!(resp.status(), StatusCode::OK);
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        let resp = app
            .clone()
            .oneshot(authorized(Method::GET, "/?domain=example.com", ""))
            .await
            .unwrap();
        let listed = json_body(resp).await;
        let mut emails: Vec<String> = listed["offers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["email"].as_str().unwrap().to_string())
            .collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), submissions);

        let resp = app
            .oneshot(authorized(Method::GET, "/requests?domain=example.com", ""))
            .await
            .unwrap();
        assert_eq!(json_body(resp).await["count"], submissions);
    }

    #[tokio::test]
    async fn test_configured_origin_reaches_every_response() {
        let mut config = node_config();
        config.router.cors.allowed_origin = "https://shop.example".into();
        let app = LedgerNode::new(config).unwrap().router().router();

        let unauthorized = axum::http::Request::builder()
            .uri("/?domain=example.com")
            .body(axum::body::Body::empty())
            .unwrap();
        let missing_domain = authorized(Method::GET, "/", "");
        let ok = authorized(Method::GET, "/?domain=example.com", "");

        for (req, status) in [
            (unauthorized, StatusCode::UNAUTHORIZED),
            (missing_domain, StatusCode::BAD_REQUEST),
            (ok, StatusCode::OK),
        ] {
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), status);
            assert_eq!(
                resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
                "https://shop.example"
            );
        }
    }
}
