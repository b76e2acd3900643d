use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Barbershop {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A bookable service in a shop's catalog ("activity" on the wire).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub activity_name: String,
    pub price: Decimal,
    pub duration_minutes: u32,
    #[serde(default)]
    pub barbershop_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Barber {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tell: Option<String>,
    #[serde(default, alias = "owner")]
    pub is_owner: bool,
    #[serde(default)]
    pub barbershop_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Completed => "Completed",
        }
    }
}

/// Appointment as listed by the "my appointments" endpoints, with the
/// related names already resolved by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub barbershop_id: Option<Uuid>,
    #[serde(default)]
    pub barbershop_name: Option<String>,
    #[serde(default)]
    pub barber_id: Option<Uuid>,
    #[serde(default)]
    pub barber_name: Option<String>,
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub activity_names: Vec<String>,
}

/// Body of `POST /appointments`. `start_time` is an ISO-8601 UTC instant.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub barbershop_id: Uuid,
    pub barber_id: Uuid,
    pub activity_ids: Vec<Uuid>,
    pub start_time: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "ROLE_CUSTOMER")]
    Customer,
    #[serde(rename = "ROLE_BARBER")]
    Barber,
    #[serde(rename = "ROLE_OWNER")]
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "ROLE_CUSTOMER",
            Role::Barber => "ROLE_BARBER",
            Role::Owner => "ROLE_OWNER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ROLE_CUSTOMER" => Some(Role::Customer),
            "ROLE_BARBER" => Some(Role::Barber),
            "ROLE_OWNER" => Some(Role::Owner),
            _ => None,
        }
    }

    /// Barbers and owners both work the chair and share the barber agenda.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Barber | Role::Owner)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Role is kept as the raw string so an unexpected value still logs in;
/// callers resolve it with [`Role::parse`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub name: String,
    #[serde(default)]
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub tell: String,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn activity_decodes_numeric_price() {
        let activity: Activity = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "activityName": "Corte",
            "price": 35.5,
            "durationMinutes": 30,
            "barbershopId": null
        }))
        .unwrap();

        assert_eq!(activity.price, Decimal::new(355, 1));
        assert_eq!(activity.duration_minutes, 30);
        assert_eq!(activity.barbershop_id, None);
    }

    #[test]
    fn appointment_request_uses_backend_field_names() {
        let request = AppointmentRequest {
            barbershop_id: Uuid::from_u128(1),
            barber_id: Uuid::from_u128(7),
            activity_ids: vec![Uuid::from_u128(2)],
            start_time: "2025-11-28T12:00:00.000Z".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["startTime"], "2025-11-28T12:00:00.000Z");
        assert!(value.get("barbershopId").is_some());
        assert_eq!(value["activityIds"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn appointment_status_uses_upper_case() {
        let status: AppointmentStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, AppointmentStatus::Cancelled);
        assert_eq!(status.label(), "Cancelled");
    }

    #[test]
    fn role_round_trips_through_its_wire_name() {
        for role in [Role::Customer, Role::Barber, Role::Owner] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("ROLE_ADMIN"), None);
        assert!(Role::Owner.is_staff());
        assert!(!Role::Customer.is_staff());
    }

    #[test]
    fn barber_accepts_jackson_owner_flag() {
        let barber: Barber = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000007",
            "name": "Rafael",
            "owner": true
        }))
        .unwrap();
        assert!(barber.is_owner);
    }

    #[test]
    fn error_body_prefers_message_over_error() {
        let body = ErrorBody {
            message: Some("Horário já ocupado".to_string()),
            error: Some("Conflict".to_string()),
        };
        assert_eq!(body.into_message().as_deref(), Some("Horário já ocupado"));
        assert_eq!(ErrorBody::default().into_message(), None);
    }
}
