/// Liveness check. Served without authentication.
pub async fn health() -> &'static str {
    "ok"
}
