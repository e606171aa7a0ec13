use axum::response::Json;
use once_cell::sync::Lazy;
use serde_json::json;
use std::time::Instant;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Pins the uptime clock to server start rather than the first request.
pub fn mark_start() {
    Lazy::force(&START_TIME);
}

pub async fn root() -> Json<serde_json::Value> {
    let elapsed = START_TIME.elapsed();

    Json(json!({
        "status": "ok",
        "message": format!("Backend is running! Uptime: {}", format_uptime(elapsed.as_secs()))
    }))
}

fn format_uptime(seconds: u64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours % 24, minutes % 60, seconds % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}
