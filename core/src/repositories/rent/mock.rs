//! Mock implementation of RentRepository for testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tb_shared::types::pagination::PageRequest;

use crate::domain::entities::Rent;
use crate::errors::MarketResult;

use super::trait_::RentRepository;

/// In-memory rent repository for tests
#[derive(Clone, Default)]
pub struct MockRentRepository {
    rents: Arc<RwLock<Vec<Rent>>>,
}

impl MockRentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, rent: Rent) {
        self.rents.write().await.push(rent);
    }

    async fn page_where<F>(&self, keep: F, page: PageRequest) -> (Vec<Rent>, u64)
    where
        F: Fn(&Rent) -> bool,
    {
        let rents = self.rents.read().await;
        let mut items: Vec<Rent> = rents.iter().filter(|r| keep(r)).cloned().collect();
        let total = items.len() as u64;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let data = items
            .into_iter()
            .skip(page.offset_i64() as usize)
            .take(page.limit_i64() as usize)
            .collect();
        (data, total)
    }
}

#[async_trait]
impl RentRepository for MockRentRepository {
    async fn list_by_renter(
        &self,
        renter_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)> {
        Ok(self.page_where(|r| r.renter_id == renter_id, page).await)
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)> {
        Ok(self.page_where(|r| r.owner_id == owner_id, page).await)
    }

    async fn list_by_product(
        &self,
        product_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)> {
        Ok(self.page_where(|r| r.product_id == product_id, page).await)
    }
}
