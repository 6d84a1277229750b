//! Contact form endpoints.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use techlens_client::ContactRequest;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub message_id: String,
}

async fn relay(state: &AppState, payload: Result<Json<ContactRequest>, JsonRejection>) -> Result<ContactResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;
    let message_id = state.mailer.send_contact(&request).await?;

    Ok(ContactResponse { success: true, message: SUCCESS_MESSAGE, message_id })
}

/// `POST /api/contact`
pub async fn contact(
    State(state): State<AppState>, payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    relay(&state, payload).await.map(Json)
}

/// `POST /api/contact-prod`
pub async fn contact_prod(
    State(state): State<AppState>, payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let response = relay(&state, payload).await?;
    tracing::info!(message_id = %response.message_id, route = "contact-prod", "contact submission accepted");
    Ok(Json(response))
}
