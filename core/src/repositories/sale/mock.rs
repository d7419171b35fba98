//! Mock implementation of SaleRepository for testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tb_shared::types::pagination::PageRequest;

use crate::domain::entities::Sale;
use crate::errors::MarketResult;

use super::trait_::SaleRepository;

/// In-memory sale repository for tests
#[derive(Clone, Default)]
pub struct MockSaleRepository {
    sales: Arc<RwLock<Vec<Sale>>>,
}

impl MockSaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, sale: Sale) {
        self.sales.write().await.push(sale);
    }

    async fn page_where<F>(&self, keep: F, page: PageRequest) -> (Vec<Sale>, u64)
    where
        F: Fn(&Sale) -> bool,
    {
        let sales = self.sales.read().await;
        let mut items: Vec<Sale> = sales.iter().filter(|s| keep(s)).cloned().collect();
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
impl SaleRepository for MockSaleRepository {
    async fn list_by_buyer(
        &self,
        buyer_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Sale>, u64)> {
        Ok(self.page_where(|s| s.buyer_id == buyer_id, page).await)
    }

    async fn list_by_seller(
        &self,
        seller_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Sale>, u64)> {
        Ok(self.page_where(|s| s.seller_id == seller_id, page).await)
    }
}
