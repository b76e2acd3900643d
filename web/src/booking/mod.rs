//! Appointment booking flow: service selection, availability lookups and
//! composing the final request.

pub mod availability;
pub mod draft;
pub mod flow;
pub mod selection;

pub use availability::{AvailabilityQuery, AvailabilityState, AvailabilityTracker, QueryTicket};
pub use draft::{local_to_utc, normalize_slot, DraftBooking};
pub use flow::BookingFlow;
pub use selection::{total_duration, total_price, ServiceSelection};

use shared_types::AppointmentRequest;

use crate::api::ApiClient;
use crate::error::{ApiError, BookingError};

/// The two backend calls the booking flow depends on.
pub trait BookingBackend {
    async fn availability(&self, query: &AvailabilityQuery) -> Result<Vec<String>, ApiError>;
    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<i64, ApiError>;
}

impl BookingBackend for ApiClient {
    async fn availability(&self, query: &AvailabilityQuery) -> Result<Vec<String>, ApiError> {
        self.barber_availability(query.barber_id, &query.date, query.duration_minutes)
            .await
    }

    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<i64, ApiError> {
        ApiClient::create_appointment(self, request).await
    }
}

/// Runs the lookup for `ticket` and feeds the answer back into `flow`.
/// Returns whether the answer was still current.
pub async fn refresh_availability<B: BookingBackend>(
    backend: &B,
    flow: &mut BookingFlow,
    ticket: QueryTicket,
) -> bool {
    let result = backend.availability(&ticket.query).await;
    flow.apply_availability(&ticket, result)
}

/// Validates and sends the draft. Nothing is sent when the draft is
/// incomplete or its time cannot be built. Backend rejections (for example
/// the slot was taken in the meantime) come back as retryable errors and the
/// draft stays as it was.
pub async fn submit_booking<B: BookingBackend>(
    backend: &B,
    flow: &BookingFlow,
) -> Result<i64, BookingError> {
    let request = flow.compose_request()?;
    tracing::info!(
        barber_id = %request.barber_id,
        start_time = %request.start_time,
        services = request.activity_ids.len(),
        "submitting appointment"
    );
    let id = backend.create_appointment(&request).await?;
    tracing::info!(appointment_id = id, "appointment created");
    Ok(id)
}
