/// Liveness probe.
pub async fn health() -> &'static str {
    "Api is running....."
}
