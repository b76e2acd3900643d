use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use shared_types::{Appointment, AppointmentRequest, Role};

use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Books an appointment and returns its id.
    pub async fn create_appointment(&self, request: &AppointmentRequest) -> Result<i64, ApiError> {
        self.post_json("/appointments", request).await
    }

    pub async fn cancel_appointment(&self, id: i64) -> Result<(), ApiError> {
        self.patch(&format!("/appointments/{id}/cancel")).await
    }

    /// Marks an appointment as done. Barber roles only.
    pub async fn conclude_appointment(&self, id: i64) -> Result<(), ApiError> {
        self.patch(&format!("/appointments/{id}/conclude")).await
    }

    /// Appointments of the logged in user, newest first. Customers and staff
    /// read different endpoints; without a known role nothing is requested.
    pub async fn my_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let Some(role) = self.session().role() else {
            tracing::warn!("no known role in session, skipping appointment lookup");
            return Ok(Vec::new());
        };

        let mut appointments: Vec<Appointment> =
            self.get_json(my_appointments_path(role), &[]).await?;
        sort_newest_first(&mut appointments);
        Ok(appointments)
    }
}

pub fn my_appointments_path(role: Role) -> &'static str {
    match role {
        Role::Customer => "/appointments/customer/me",
        Role::Barber | Role::Owner => "/appointments/barber/me",
    }
}

/// Sorts by start instant, latest first. Unparseable times go last.
pub fn sort_newest_first(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        match (parse_instant(&a.start_time), parse_instant(&b.start_time)) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

fn parse_instant(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}
