use std::collections::BTreeSet;

use rust_decimal::Decimal;
use shared_types::Activity;
use uuid::Uuid;

/// Services picked for one booking. A set: toggling adds or removes, and
/// the order services were picked in carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSelection {
    ids: BTreeSet<Uuid>,
}

impl ServiceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `id` is selected after the call.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uuid> + '_ {
        self.ids.iter()
    }

    /// Drops ids the catalog no longer offers. Returns whether anything was removed.
    pub fn retain_offered(&mut self, catalog: &[Activity]) -> bool {
        let before = self.ids.len();
        self.ids
            .retain(|id| catalog.iter().any(|activity| activity.id == *id));
        self.ids.len() != before
    }
}

impl FromIterator<Uuid> for ServiceSelection {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Minutes of chair time for the selection. Ids missing from the catalog add nothing.
pub fn total_duration(selection: &ServiceSelection, catalog: &[Activity]) -> u32 {
    catalog
        .iter()
        .filter(|activity| selection.contains(&activity.id))
        .map(|activity| activity.duration_minutes)
        .sum()
}

pub fn total_price(selection: &ServiceSelection, catalog: &[Activity]) -> Decimal {
    catalog
        .iter()
        .filter(|activity| selection.contains(&activity.id))
        .map(|activity| activity.price)
        .sum()
}
