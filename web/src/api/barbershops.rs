use shared_types::{Activity, Barber, Barbershop};
use uuid::Uuid;

use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_barbershops(&self) -> Result<Vec<Barbershop>, ApiError> {
        self.get_json("/barbershops", &[]).await
    }

    /// The shop's service catalog.
    pub async fn shop_activities(&self, shop_id: Uuid) -> Result<Vec<Activity>, ApiError> {
        self.get_json(&format!("/barbershops/{shop_id}/activities"), &[])
            .await
    }

    pub async fn shop_barbers(&self, shop_id: Uuid) -> Result<Vec<Barber>, ApiError> {
        self.get_json(&format!("/barbershops/{shop_id}/barbers"), &[])
            .await
    }

    /// Free start times for `duration_minutes` of work with `barber_id` on
    /// `date` (`YYYY-MM-DD`). Times come back as `HH:MM` or `HH:MM:SS`.
    pub async fn barber_availability(
        &self,
        barber_id: Uuid,
        date: &str,
        duration_minutes: u32,
    ) -> Result<Vec<String>, ApiError> {
        self.get_json(
            &format!("/barbers/{barber_id}/availability"),
            &[
                ("date", date.to_string()),
                ("duration", duration_minutes.to_string()),
            ],
        )
        .await
    }
}

/// Case-insensitive match on shop name or address, used by the home search.
pub fn filter_barbershops<'a>(shops: &'a [Barbershop], query: &str) -> Vec<&'a Barbershop> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return shops.iter().collect();
    }

    shops
        .iter()
        .filter(|shop| {
            shop.name.to_lowercase().contains(&needle)
                || shop
                    .address
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
        })
        .collect()
}
