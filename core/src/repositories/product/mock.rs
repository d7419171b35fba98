//! Mock implementation of ProductRepository for testing

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use tb_shared::types::pagination::PageRequest;

use crate::domain::entities::{NewProduct, Product, ProductStatus};
use crate::errors::MarketResult;

use super::trait_::ProductRepository;

/// In-memory product repository for tests
#[derive(Clone, Default)]
pub struct MockProductRepository {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    products: HashMap<i64, Product>,
    next_id: i64,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed product, bypassing the repository contract.
    pub async fn seed(&self, product: Product) {
        let mut inner = self.inner.write().await;
        inner.next_id = inner.next_id.max(product.id);
        inner.products.insert(product.id, product);
    }

    /// Current state of a product, for assertions.
    pub async fn get(&self, id: i64) -> Option<Product> {
        self.inner.read().await.products.get(&id).cloned()
    }

    fn page_of(mut items: Vec<Product>, page: PageRequest) -> (Vec<Product>, u64) {
        let total = items.len() as u64;
        // newest first, id as tie-breaker for equal timestamps
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
impl ProductRepository for MockProductRepository {
    async fn find_by_id(&self, id: i64) -> MarketResult<Option<Product>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> MarketResult<Product> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let now = Utc::now();
        let stored = Product {
            id: inner.next_id,
            title: product.title,
            description: product.description,
            categories: product.categories,
            purchase_price: product.purchase_price,
            rent_price: product.rent_price,
            rental_period: product.rental_period,
            status: ProductStatus::Available,
            view_count: 0,
            owner_id: product.owner_id,
            created_at: now,
            updated_at: now,
        };
        inner.products.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, product: &Product) -> MarketResult<Option<Product>> {
        let mut inner = self.inner.write().await;
        if !inner.products.contains_key(&product.id) {
            return Ok(None);
        }
        inner.products.insert(product.id, product.clone());
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> MarketResult<bool> {
        Ok(self.inner.write().await.products.remove(&id).is_some())
    }

    async fn increment_views(&self, id: i64) -> MarketResult<Option<Product>> {
        let mut inner = self.inner.write().await;
        Ok(inner.products.get_mut(&id).map(|product| {
            product.view_count += 1;
            product.clone()
        }))
    }

    async fn list(
        &self,
        categories: Option<&[String]>,
        page: PageRequest,
    ) -> MarketResult<(Vec<Product>, u64)> {
        let inner = self.inner.read().await;
        let items = inner
            .products
            .values()
            .filter(|p| match categories {
                Some(tags) => p.categories.iter().any(|c| tags.contains(c)),
                None => true,
            })
            .cloned()
            .collect();
        Ok(Self::page_of(items, page))
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Product>, u64)> {
        let inner = self.inner.read().await;
        let items = inner
            .products
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(Self::page_of(items, page))
    }
}
