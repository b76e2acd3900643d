use chrono::TimeZone;
use rust_decimal::Decimal;
use shared_types::{Activity, AppointmentRequest, Barber};
use uuid::Uuid;

use super::availability::{AvailabilityQuery, AvailabilityState, AvailabilityTracker, QueryTicket};
use super::draft::DraftBooking;
use super::selection::{total_duration, total_price};
use crate::error::{ApiError, BookingError};

/// State of the booking screen for one shop.
///
/// Every change to barber, date or services clears the chosen slot and
/// either returns a [`QueryTicket`] for a fresh availability lookup or, when
/// the inputs are incomplete, resets the slot list. The caller runs the
/// lookup and hands the result back through [`BookingFlow::apply_availability`];
/// results for superseded tickets are ignored.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    catalog: Vec<Activity>,
    barbers: Vec<Barber>,
    draft: DraftBooking,
    availability: AvailabilityTracker,
}

impl BookingFlow {
    pub fn new(shop_id: Uuid) -> Self {
        Self {
            catalog: Vec::new(),
            barbers: Vec::new(),
            draft: DraftBooking::new(shop_id),
            availability: AvailabilityTracker::default(),
        }
    }

    pub fn shop_id(&self) -> Uuid {
        self.draft.shop_id
    }

    pub fn catalog(&self) -> &[Activity] {
        &self.catalog
    }

    pub fn barbers(&self) -> &[Barber] {
        &self.barbers
    }

    pub fn draft(&self) -> &DraftBooking {
        &self.draft
    }

    pub fn availability(&self) -> &AvailabilityState {
        self.availability.state()
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.draft.slot.as_deref()
    }

    pub fn is_selected(&self, service_id: &Uuid) -> bool {
        self.draft.services.contains(service_id)
    }

    pub fn total_duration(&self) -> u32 {
        total_duration(&self.draft.services, &self.catalog)
    }

    pub fn total_price(&self) -> Decimal {
        total_price(&self.draft.services, &self.catalog)
    }

    /// Replaces the service catalog. Selections the shop no longer offers are
    /// dropped and availability is recomputed with the new durations.
    pub fn set_catalog(&mut self, catalog: Vec<Activity>) -> Option<QueryTicket> {
        self.catalog = catalog;
        self.draft.services.retain_offered(&self.catalog);
        self.invalidate()
    }

    /// Replaces the barber roster. A selected barber missing from it is unset.
    pub fn set_barbers(&mut self, barbers: Vec<Barber>) -> Option<QueryTicket> {
        self.barbers = barbers;
        let still_listed = self
            .draft
            .barber_id
            .map_or(true, |id| self.barbers.iter().any(|b| b.id == id));
        if still_listed {
            return None;
        }
        self.draft.barber_id = None;
        self.invalidate()
    }

    pub fn toggle_service(&mut self, service_id: Uuid) -> Result<Option<QueryTicket>, BookingError> {
        if !self.catalog.iter().any(|a| a.id == service_id) {
            return Err(BookingError::UnknownService);
        }
        self.draft.services.toggle(service_id);
        Ok(self.invalidate())
    }

    /// Picking the barber that is already selected changes nothing.
    pub fn select_barber(&mut self, barber_id: Uuid) -> Result<Option<QueryTicket>, BookingError> {
        if !self.barbers.iter().any(|b| b.id == barber_id) {
            return Err(BookingError::UnknownBarber);
        }
        if self.draft.barber_id == Some(barber_id) {
            return Ok(None);
        }
        self.draft.barber_id = Some(barber_id);
        Ok(self.invalidate())
    }

    pub fn set_date(&mut self, date: impl Into<String>) -> Option<QueryTicket> {
        let date = date.into();
        if self.draft.date == date {
            return None;
        }
        self.draft.date = date;
        self.invalidate()
    }

    /// Only times from the list currently on screen can be chosen.
    pub fn choose_slot(&mut self, slot: &str) -> Result<(), BookingError> {
        if !self.availability.state().slots().iter().any(|s| s == slot) {
            return Err(BookingError::UnknownSlot(slot.to_string()));
        }
        self.draft.slot = Some(slot.to_string());
        Ok(())
    }

    pub fn apply_availability(
        &mut self,
        ticket: &QueryTicket,
        result: Result<Vec<String>, ApiError>,
    ) -> bool {
        self.availability.apply(ticket, result)
    }

    pub fn retry_availability(&mut self) -> Option<QueryTicket> {
        self.draft.slot = None;
        self.availability.retry()
    }

    pub fn can_submit(&self) -> bool {
        self.draft.can_submit()
    }

    pub fn compose_request(&self) -> Result<AppointmentRequest, BookingError> {
        self.draft.compose_request()
    }

    pub fn compose_request_in<Tz: TimeZone>(
        &self,
        tz: &Tz,
    ) -> Result<AppointmentRequest, BookingError> {
        self.draft.compose_request_in(tz)
    }

    /// The lookup the current inputs call for, if they are complete. The
    /// duration is always computed from the selection as it is right now.
    pub fn pending_query(&self) -> Option<AvailabilityQuery> {
        let barber_id = self.draft.barber_id?;
        let date = self.draft.date.trim();
        if date.is_empty() || self.draft.services.is_empty() {
            return None;
        }
        Some(AvailabilityQuery {
            barber_id,
            date: date.to_string(),
            duration_minutes: self.total_duration(),
        })
    }

    fn invalidate(&mut self) -> Option<QueryTicket> {
        self.draft.slot = None;
        match self.pending_query() {
            Some(query) => Some(self.availability.begin(query)),
            None => {
                self.availability.reset();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(id: u128, minutes: u32) -> Activity {
        Activity {
            id: Uuid::from_u128(id),
            activity_name: format!("service {id}"),
            price: Decimal::new(3000, 2),
            duration_minutes: minutes,
            barbershop_id: None,
        }
    }

    fn barber(id: u128) -> Barber {
        Barber {
            id: Uuid::from_u128(id),
            name: format!("barber {id}"),
            email: None,
            tell: None,
            is_owner: false,
            barbershop_id: None,
        }
    }

    fn flow() -> BookingFlow {
        let mut flow = BookingFlow::new(Uuid::from_u128(100));
        assert_eq!(flow.set_catalog(vec![activity(1, 30), activity(2, 45)]), None);
        assert_eq!(flow.set_barbers(vec![barber(7), barber(8)]), None);
        flow
    }

    fn ready_with_slot(flow: &mut BookingFlow) {
        flow.select_barber(Uuid::from_u128(7)).unwrap();
        flow.set_date("2025-12-01");
        let ticket = flow.toggle_service(Uuid::from_u128(1)).unwrap().unwrap();
        flow.apply_availability(&ticket, Ok(vec!["09:00:00".to_string()]));
        flow.choose_slot("09:00:00").unwrap();
    }

    #[test]
    fn incomplete_inputs_do_not_query() {
        let mut flow = flow();
        assert_eq!(flow.toggle_service(Uuid::from_u128(1)).unwrap(), None);
        assert_eq!(flow.select_barber(Uuid::from_u128(7)).unwrap(), None);
        assert_eq!(flow.availability(), &AvailabilityState::Idle);

        let ticket = flow.set_date("2025-12-01").unwrap();
        assert_eq!(ticket.query.duration_minutes, 30);
        assert_eq!(flow.availability(), &AvailabilityState::Loading);
    }

    #[test]
    fn query_uses_current_duration() {
        let mut flow = flow();
        flow.select_barber(Uuid::from_u128(7)).unwrap();
        flow.set_date("2025-12-01");
        flow.toggle_service(Uuid::from_u128(1)).unwrap();
        let ticket = flow.toggle_service(Uuid::from_u128(2)).unwrap().unwrap();
        assert_eq!(ticket.query.duration_minutes, 75);
        assert_eq!(flow.total_duration(), 75);
    }

    #[test]
    fn every_input_change_clears_the_slot() {
        let changes: [fn(&mut BookingFlow); 3] = [
            |f| {
                f.select_barber(Uuid::from_u128(8)).unwrap();
            },
            |f| {
                f.set_date("2025-12-02");
            },
            |f| {
                f.toggle_service(Uuid::from_u128(2)).unwrap();
            },
        ];

        for change in changes {
            let mut flow = flow();
            ready_with_slot(&mut flow);
            assert!(flow.can_submit());

            change(&mut flow);
            assert_eq!(flow.selected_slot(), None);
            assert!(!flow.can_submit());
            assert!(flow.availability().slots().is_empty());
        }
    }

    #[test]
    fn removing_last_service_goes_idle() {
        let mut flow = flow();
        ready_with_slot(&mut flow);
        assert_eq!(flow.toggle_service(Uuid::from_u128(1)).unwrap(), None);
        assert_eq!(flow.availability(), &AvailabilityState::Idle);
    }

    #[test]
    fn reselecting_same_barber_keeps_slot() {
        let mut flow = flow();
        ready_with_slot(&mut flow);
        assert_eq!(flow.select_barber(Uuid::from_u128(7)).unwrap(), None);
        assert_eq!(flow.selected_slot(), Some("09:00:00"));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut flow = flow();
        assert!(matches!(
            flow.toggle_service(Uuid::from_u128(99)),
            Err(BookingError::UnknownService)
        ));
        assert!(matches!(
            flow.select_barber(Uuid::from_u128(99)),
            Err(BookingError::UnknownBarber)
        ));
        assert!(matches!(
            flow.choose_slot("09:00"),
            Err(BookingError::UnknownSlot(_))
        ));
    }

    #[test]
    fn catalog_reload_drops_missing_services() {
        let mut flow = flow();
        ready_with_slot(&mut flow);

        let ticket = flow.set_catalog(vec![activity(1, 60)]).unwrap();
        assert_eq!(ticket.query.duration_minutes, 60);
        assert_eq!(flow.selected_slot(), None);

        assert_eq!(flow.set_catalog(vec![activity(2, 45)]), None);
        assert!(flow.draft().services.is_empty());
    }

    #[test]
    fn roster_reload_unsets_departed_barber() {
        let mut flow = flow();
        ready_with_slot(&mut flow);

        assert_eq!(flow.set_barbers(vec![barber(7)]), None);
        assert_eq!(flow.selected_slot(), Some("09:00:00"));

        assert_eq!(flow.set_barbers(vec![barber(8)]), None);
        assert_eq!(flow.draft().barber_id, None);
        assert_eq!(flow.selected_slot(), None);
        assert_eq!(flow.availability(), &AvailabilityState::Idle);
    }

    #[test]
    fn retry_reissues_same_parameters() {
        let mut flow = flow();
        flow.select_barber(Uuid::from_u128(7)).unwrap();
        flow.set_date("2025-12-01");
        let ticket = flow.toggle_service(Uuid::from_u128(1)).unwrap().unwrap();
        flow.apply_availability(&ticket, Err(ApiError::Decode("bad json".to_string())));
        assert!(matches!(flow.availability(), AvailabilityState::Failed(_)));

        let retry = flow.retry_availability().unwrap();
        assert_eq!(retry.query, ticket.query);
        assert!(!flow.apply_availability(&ticket, Ok(vec![])));
        assert!(flow.apply_availability(&retry, Ok(vec!["10:00".to_string()])));
    }
}
