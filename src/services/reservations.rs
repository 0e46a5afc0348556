use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::models::{BackendError, ToolResult};

/// The three opaque reservation-store operations the orchestrator can invoke.
/// Implementations must never panic: every failure mode comes back as the
/// error variant of [`ToolResult`].
#[async_trait]
pub trait ReservationBackend: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn book(
        &self,
        passenger_name: &str,
        origin: &str,
        destination: &str,
        date: &str,
        time: &str,
        flight_class: &str,
    ) -> ToolResult;

    async fn cancel(&self, booking_reference: &str) -> ToolResult;

    async fn reschedule(&self, booking_reference: &str, new_date: &str, new_time: &str)
        -> ToolResult;
}

/// HTTP client for the reservation store. Transport errors, timeouts and
/// backend-reported errors all degrade to `Err(BackendError)`.
pub struct HttpReservationBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpReservationBackend {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { base_url, client }
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> ToolResult {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError(e.to_string()))?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| BackendError(e.to_string()))?;

        // The backend reports application errors as {"error": ...} with a
        // non-2xx status; prefer its message over a bare status line.
        if let Some(error) = data.get("error").and_then(|v| v.as_str()) {
            return Err(BackendError(error.to_string()));
        }
        if !status.is_success() {
            return Err(BackendError(format!("backend returned {status}")));
        }

        serde_json::from_value(data).map_err(|e| BackendError(e.to_string()))
    }
}

#[async_trait]
impl ReservationBackend for HttpReservationBackend {
    async fn book(
        &self,
        passenger_name: &str,
        origin: &str,
        destination: &str,
        date: &str,
        time: &str,
        flight_class: &str,
    ) -> ToolResult {
        self.post(
            "book-flight",
            json!({
                "passenger_name": passenger_name,
                "origin": origin,
                "destination": destination,
                "date": date,
                "time": time,
                "flight_class": flight_class,
            }),
        )
        .await
    }

    async fn cancel(&self, booking_reference: &str) -> ToolResult {
        self.post(
            "cancel-flight",
            json!({ "booking_reference": booking_reference }),
        )
        .await
    }

    async fn reschedule(
        &self,
        booking_reference: &str,
        new_date: &str,
        new_time: &str,
    ) -> ToolResult {
        self.post(
            "reschedule-flight",
            json!({
                "booking_reference": booking_reference,
                "new_date": new_date,
                "new_time": new_time,
            }),
        )
        .await
    }
}
