//! # Integration Flows
//!
//! End-to-end checks that span the ledger, the router and the node wiring.

pub mod http_flows;
pub mod persistence;

#[cfg(test)]
use axum::body::Body;
#[cfg(test)]
use axum::http::{header, Method, Request};

/// Bearer token used by every integration fixture.
pub const TOKEN: &str = "integration-token";

/// Authorized request with a JSON body.
#[cfg(test)]
pub fn authorized(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Collect a response body as JSON.
#[cfg(test)]
pub async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}
