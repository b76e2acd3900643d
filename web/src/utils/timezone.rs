//! Display helpers for times, prices and durations on the booking screens.
use chrono::{DateTime, Local, TimeZone};
use rust_decimal::Decimal;

/// Slots come back as `HH:MM` or `HH:MM:SS`; show them as `HH:MM`.
pub fn format_slot_label(slot: &str) -> String {
    let slot = slot.trim();
    match slot.get(..5) {
        Some(hm) if slot.len() == 8 && hm.as_bytes().get(2) == Some(&b':') => hm.to_string(),
        _ => slot.to_string(),
    }
}

/// Renders an appointment start (ISO-8601 with offset) as `dd/mm HH:MM` in
/// the viewer's timezone.
pub fn format_appointment_time(start_time: &str) -> String {
    format_appointment_time_in(start_time, &Local)
}

pub fn format_appointment_time_in<Tz: TimeZone>(start_time: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(start_time) {
        Ok(instant) => instant.with_timezone(tz).format("%d/%m %H:%M").to_string(),
        // Fallback to original if parsing fails
        Err(_) => start_time.to_string(),
    }
}

pub fn format_price(price: Decimal) -> String {
    format!("R$ {:.2}", price.round_dp(2))
}

pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}min"),
    }
}

/// Today's date in the viewer's timezone, as the date input expects it.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
