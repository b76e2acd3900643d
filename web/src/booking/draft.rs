use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use shared_types::AppointmentRequest;
use uuid::Uuid;

use super::selection::ServiceSelection;
use crate::error::{BookingError, MissingField};

/// What the user has picked so far on the booking screen. Lives only in
/// memory and is dropped once the appointment is created.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftBooking {
    pub shop_id: Uuid,
    pub barber_id: Option<Uuid>,
    pub services: ServiceSelection,
    /// Calendar date as typed in the date input, `YYYY-MM-DD`.
    pub date: String,
    pub slot: Option<String>,
}

impl DraftBooking {
    pub fn new(shop_id: Uuid) -> Self {
        Self {
            shop_id,
            barber_id: None,
            services: ServiceSelection::new(),
            date: String::new(),
            slot: None,
        }
    }

    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.barber_id.is_none() {
            missing.push(MissingField::Barber);
        }
        if self.date.trim().is_empty() {
            missing.push(MissingField::Date);
        }
        if self.services.is_empty() {
            missing.push(MissingField::Services);
        }
        if self.slot.as_deref().map_or(true, |s| s.trim().is_empty()) {
            missing.push(MissingField::Slot);
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Builds the request, reading date and slot as wall-clock time in the
    /// machine's local timezone.
    pub fn compose_request(&self) -> Result<AppointmentRequest, BookingError> {
        self.compose_request_in(&Local)
    }

    pub fn compose_request_in<Tz: TimeZone>(
        &self,
        tz: &Tz,
    ) -> Result<AppointmentRequest, BookingError> {
        let missing = self.missing_fields();
        let (Some(barber_id), Some(slot), true) =
            (self.barber_id, self.slot.as_deref(), missing.is_empty())
        else {
            return Err(BookingError::Incomplete { missing });
        };

        let start = local_to_utc(&self.date, slot, tz)?;

        Ok(AppointmentRequest {
            barbershop_id: self.shop_id,
            barber_id,
            activity_ids: self.services.iter().copied().collect(),
            start_time: start.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// `HH:MM` becomes `HH:MM:00`; anything else is passed through trimmed.
pub fn normalize_slot(slot: &str) -> String {
    let slot = slot.trim();
    let bytes = slot.as_bytes();
    if bytes.len() == 5 && bytes[2] == b':' {
        format!("{slot}:00")
    } else {
        slot.to_string()
    }
}

/// Interprets `date` + `slot` as wall-clock time in `tz`. Times that do not
/// exist there (invalid values, DST gaps) are rejected; repeated times in a
/// DST overlap resolve to the earlier instant.
pub fn local_to_utc<Tz: TimeZone>(
    date: &str,
    slot: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, BookingError> {
    let combined = format!("{}T{}", date.trim(), normalize_slot(slot));
    let naive = NaiveDateTime::parse_from_str(&combined, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| BookingError::InvalidDateTime(combined.clone()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or(BookingError::InvalidDateTime(combined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn complete_draft(slot: &str) -> DraftBooking {
        DraftBooking {
            shop_id: Uuid::from_u128(100),
            barber_id: Some(Uuid::from_u128(7)),
            services: [Uuid::from_u128(1)].into_iter().collect(),
            date: "2025-11-28".to_string(),
            slot: Some(slot.to_string()),
        }
    }

    fn sao_paulo() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    #[test]
    fn normalize_pads_missing_seconds() {
        assert_eq!(normalize_slot("09:00"), "09:00:00");
        assert_eq!(normalize_slot("09:00:00"), "09:00:00");
        assert_eq!(normalize_slot(" 14:30 "), "14:30:00");
    }

    #[test]
    fn both_slot_granularities_compose_to_the_same_instant() {
        for slot in ["09:00", "09:00:00"] {
            let request = complete_draft(slot).compose_request_in(&sao_paulo()).unwrap();
            assert_eq!(request.start_time, "2025-11-28T12:00:00.000Z");
            assert_eq!(request.barber_id, Uuid::from_u128(7));
            assert_eq!(request.barbershop_id, Uuid::from_u128(100));
            assert_eq!(request.activity_ids, vec![Uuid::from_u128(1)]);
        }
    }

    #[test]
    fn local_timezone_keeps_wall_clock() {
        let request = complete_draft("09:00").compose_request().unwrap();
        let instant = DateTime::parse_from_rfc3339(&request.start_time).unwrap();
        let local = instant.with_timezone(&Local);

        assert_eq!(local.date_naive().to_string(), "2025-11-28");
        assert_eq!((local.hour(), local.minute(), local.second()), (9, 0, 0));
    }

    #[test]
    fn impossible_time_is_rejected() {
        let err = complete_draft("25:99").compose_request_in(&sao_paulo()).unwrap_err();
        assert!(matches!(err, BookingError::InvalidDateTime(ref s) if s == "2025-11-28T25:99:00"));
    }

    #[test]
    fn impossible_date_is_rejected() {
        let mut draft = complete_draft("09:00");
        draft.date = "2025-02-30".to_string();
        assert!(matches!(
            draft.compose_request_in(&sao_paulo()),
            Err(BookingError::InvalidDateTime(_))
        ));
    }

    #[test]
    fn gating_requires_every_field() {
        assert!(complete_draft("09:00").can_submit());

        let mut no_barber = complete_draft("09:00");
        no_barber.barber_id = None;
        let mut no_date = complete_draft("09:00");
        no_date.date = "  ".to_string();
        let mut no_slot = complete_draft("09:00");
        no_slot.slot = None;
        let mut no_services = complete_draft("09:00");
        no_services.services = ServiceSelection::new();

        for (draft, field) in [
            (no_barber, MissingField::Barber),
            (no_date, MissingField::Date),
            (no_slot, MissingField::Slot),
            (no_services, MissingField::Services),
        ] {
            assert!(!draft.can_submit());
            assert_eq!(draft.missing_fields(), vec![field]);
            assert!(matches!(
                draft.compose_request_in(&sao_paulo()),
                Err(BookingError::Incomplete { ref missing }) if missing == &vec![field]
            ));
        }
    }
}
