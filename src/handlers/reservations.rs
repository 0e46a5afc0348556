use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::ApiError;
use crate::models::{Booking, BookingStatus};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BookFlightRequest {
    pub passenger_name: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub time: String,
    #[serde(default = "default_flight_class")]
    pub flight_class: String,
}

fn default_flight_class() -> String {
    "Economy".to_string()
}

#[derive(Deserialize)]
pub struct CancelFlightRequest {
    pub booking_reference: String,
}

#[derive(Deserialize)]
pub struct RescheduleFlightRequest {
    pub booking_reference: String,
    pub new_date: String,
    pub new_time: String,
}

#[derive(Serialize)]
pub struct BookFlightResponse {
    pub booking_reference: String,
    pub status: String,
    pub passenger_name: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub time: String,
}

#[derive(Serialize)]
pub struct CancelFlightResponse {
    pub booking_reference: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct RescheduleFlightResponse {
    pub booking_reference: String,
    pub status: String,
    pub date: String,
    pub time: String,
}

pub async fn book_flight(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookFlightRequest>,
) -> Result<Json<BookFlightResponse>, ApiError> {
    let now = Utc::now().naive_utc();
    let booking = Booking {
        booking_reference: Booking::new_reference(),
        passenger_name: req.passenger_name,
        origin: req.origin,
        destination: req.destination,
        date: req.date,
        time: req.time,
        flight_class: req.flight_class,
        status: BookingStatus::Confirmed,
        created_at: now,
        updated_at: now,
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_booking(&db, &booking)?;
    }

    tracing::info!(reference = %booking.booking_reference, "booking created");

    Ok(Json(BookFlightResponse {
        booking_reference: booking.booking_reference,
        status: booking.status.as_str().to_string(),
        passenger_name: booking.passenger_name,
        origin: booking.origin,
        destination: booking.destination,
        date: booking.date,
        time: booking.time,
    }))
}

pub async fn cancel_flight(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CancelFlightRequest>,
) -> Result<Json<CancelFlightResponse>, ApiError> {
    let db = state.db.lock().unwrap();

    let booking = queries::get_booking(&db, &req.booking_reference)?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    if booking.status == BookingStatus::Cancelled {
        return Err(ApiError::Conflict("Booking already cancelled".to_string()));
    }

    queries::update_booking_status(&db, &req.booking_reference, BookingStatus::Cancelled)?;

    tracing::info!(reference = %req.booking_reference, "booking cancelled");

    Ok(Json(CancelFlightResponse {
        booking_reference: req.booking_reference,
        status: BookingStatus::Cancelled.as_str().to_string(),
    }))
}

pub async fn reschedule_flight(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RescheduleFlightRequest>,
) -> Result<Json<RescheduleFlightResponse>, ApiError> {
    let db = state.db.lock().unwrap();

    let booking = queries::get_booking(&db, &req.booking_reference)?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    if booking.status == BookingStatus::Cancelled {
        return Err(ApiError::Conflict(
            "Cannot reschedule a cancelled booking".to_string(),
        ));
    }

    queries::reschedule_booking(&db, &req.booking_reference, &req.new_date, &req.new_time)?;

    tracing::info!(reference = %req.booking_reference, "booking rescheduled");

    Ok(Json(RescheduleFlightResponse {
        booking_reference: req.booking_reference,
        status: BookingStatus::Rescheduled.as_str().to_string(),
        date: req.new_date,
        time: req.new_time,
    }))
}
