use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::checkin::CheckInRecord;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
}

/// Accept a check-in reported by a client.
///
/// Nothing is stored; the record is logged and acknowledged.
pub async fn receive_check_in(
    Json(payload): Json<CheckInRecord>,
) -> AppResult<Json<CheckInReceipt>> {
    let checked_in_at = DateTime::parse_from_rfc3339(&payload.timestamp).map_err(|e| {
        AppError::BadRequest(format!("Invalid timestamp {:?}: {}", payload.timestamp, e))
    })?;

    let receipt = CheckInReceipt {
        id: Uuid::new_v4(),
        received_at: Utc::now(),
    };

    tracing::info!(
        id = %receipt.id,
        user_email = %payload.user_email,
        manager_email = %payload.manager_email,
        checked_in_at = %checked_in_at.with_timezone(&Utc),
        "Check-in received"
    );

    Ok(Json(receipt))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
