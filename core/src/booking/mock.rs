//! In-memory implementation of the booking unit of work for tests.
//!
//! Writes are buffered per transaction and applied on commit, mirroring the
//! visibility rules of the real PostgreSQL store. Advisory locks are a
//! plain set of held product ids, released at commit or rollback. Failure
//! injection knobs let tests force a status update or a commit to fail so
//! the all-or-nothing contract can be exercised.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::domain::entities::{
    NewAuditRecord, NewRent, NewSale, Product, ProductStatus, Rent, Sale,
};
use crate::errors::{MarketError, MarketResult};

use super::{BookingStore, BookingTx};

#[derive(Default)]
struct State {
    products: HashMap<i64, Product>,
    rents: Vec<Rent>,
    sales: Vec<Sale>,
    users: HashSet<i64>,
    audits: Vec<NewAuditRecord>,
    locks: HashSet<i64>,
    next_rent_id: i64,
    next_sale_id: i64,
    fail_status_updates: bool,
    fail_commits: bool,
}

/// Shared in-memory booking store.
#[derive(Clone, Default)]
pub struct MockBookingStore {
    state: Arc<Mutex<State>>,
}

impl MockBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_product(&self, product: Product) {
        self.state.lock().await.products.insert(product.id, product);
    }

    pub async fn seed_user(&self, user_id: i64) {
        self.state.lock().await.users.insert(user_id);
    }

    /// Committed state of a product.
    pub async fn product(&self, id: i64) -> Option<Product> {
        self.state.lock().await.products.get(&id).cloned()
    }

    /// All committed rents.
    pub async fn rents(&self) -> Vec<Rent> {
        self.state.lock().await.rents.clone()
    }

    /// All committed sales.
    pub async fn sales(&self) -> Vec<Sale> {
        self.state.lock().await.sales.clone()
    }

    /// All committed audit records.
    pub async fn audits(&self) -> Vec<NewAuditRecord> {
        self.state.lock().await.audits.clone()
    }

    /// Simulate a foreign transaction holding the advisory lock.
    pub async fn hold_external_lock(&self, product_id: i64) {
        self.state.lock().await.locks.insert(product_id);
    }

    /// Make every subsequent status update fail.
    pub async fn fail_status_updates(&self, fail: bool) {
        self.state.lock().await.fail_status_updates = fail;
    }

    /// Make every subsequent commit fail.
    pub async fn fail_commits(&self, fail: bool) {
        self.state.lock().await.fail_commits = fail;
    }
}

#[async_trait]
impl BookingStore for MockBookingStore {
    async fn begin(&self) -> MarketResult<Box<dyn BookingTx>> {
        Ok(Box::new(MockBookingTx {
            state: Arc::clone(&self.state),
            held_locks: Vec::new(),
            pending: Vec::new(),
            finished: false,
        }))
    }
}

enum Pending {
    Rent(Rent),
    Sale(Sale),
    Status { product_id: i64, status: ProductStatus },
    Audit(NewAuditRecord),
}

/// One buffered transaction over the shared state.
pub struct MockBookingTx {
    state: Arc<Mutex<State>>,
    held_locks: Vec<i64>,
    pending: Vec<Pending>,
    finished: bool,
}

impl MockBookingTx {
    async fn release_locks(&mut self) {
        let mut state = self.state.lock().await;
        for id in self.held_locks.drain(..) {
            state.locks.remove(&id);
        }
    }
}

impl Drop for MockBookingTx {
    fn drop(&mut self) {
        // Dropped without commit/rollback: release locks synchronously so a
        // leaked transaction cannot wedge later tests.
        if !self.finished {
            if let Ok(mut state) = self.state.try_lock() {
                for id in self.held_locks.drain(..) {
                    state.locks.remove(&id);
                }
            }
        }
    }
}

#[async_trait]
impl BookingTx for MockBookingTx {
    async fn try_lock_product(&mut self, product_id: i64) -> MarketResult<bool> {
        let mut state = self.state.lock().await;
        if state.locks.contains(&product_id) {
            return Ok(false);
        }
        state.locks.insert(product_id);
        self.held_locks.push(product_id);
        Ok(true)
    }

    async fn product_for_update(&mut self, product_id: i64) -> MarketResult<Option<Product>> {
        // Row blocking is not simulated; callers get the committed state.
        let state = self.state.lock().await;
        let mut product = state.products.get(&product_id).cloned();
        if let Some(ref mut product) = product {
            // Own uncommitted status writes are visible inside the tx.
            for write in &self.pending {
                if let Pending::Status { product_id: id, status } = write {
                    if *id == product.id {
                        product.status = *status;
                    }
                }
            }
        }
        Ok(product)
    }

    async fn find_overlapping_rent(
        &mut self,
        product_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> MarketResult<Option<Rent>> {
        let state = self.state.lock().await;
        let committed = state
            .rents
            .iter()
            .find(|r| r.product_id == product_id && r.overlaps(start, end))
            .cloned();
        if committed.is_some() {
            return Ok(committed);
        }
        Ok(self
            .pending
            .iter()
            .filter_map(|w| match w {
                Pending::Rent(r) if r.product_id == product_id && r.overlaps(start, end) => {
                    Some(r.clone())
                }
                _ => None,
            })
            .next())
    }

    async fn user_exists(&mut self, user_id: i64) -> MarketResult<bool> {
        Ok(self.state.lock().await.users.contains(&user_id))
    }

    async fn insert_rent(&mut self, rent: NewRent) -> MarketResult<Rent> {
        let mut state = self.state.lock().await;
        state.next_rent_id += 1;
        let stored = Rent {
            id: state.next_rent_id,
            product_id: rent.product_id,
            renter_id: rent.renter_id,
            owner_id: rent.owner_id,
            rent_price: rent.rent_price,
            start_date: rent.start_date,
            end_date: rent.end_date,
            created_at: Utc::now(),
        };
        drop(state);
        self.pending.push(Pending::Rent(stored.clone()));
        Ok(stored)
    }

    async fn insert_sale(&mut self, sale: NewSale) -> MarketResult<Sale> {
        let mut state = self.state.lock().await;
        state.next_sale_id += 1;
        let stored = Sale {
            id: state.next_sale_id,
            product_id: sale.product_id,
            buyer_id: sale.buyer_id,
            seller_id: sale.seller_id,
            price: sale.price,
            created_at: Utc::now(),
        };
        drop(state);
        self.pending.push(Pending::Sale(stored.clone()));
        Ok(stored)
    }

    async fn update_product_status(
        &mut self,
        product_id: i64,
        status: ProductStatus,
    ) -> MarketResult<()> {
        let state = self.state.lock().await;
        if state.fail_status_updates {
            return Err(MarketError::database("injected status update failure"));
        }
        if !state.products.contains_key(&product_id) {
            return Err(MarketError::not_found("Product"));
        }
        drop(state);
        self.pending.push(Pending::Status { product_id, status });
        Ok(())
    }

    async fn insert_audit(&mut self, entry: NewAuditRecord) -> MarketResult<()> {
        self.pending.push(Pending::Audit(entry));
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> MarketResult<()> {
        self.finished = true;
        {
            let mut state = self.state.lock().await;
            if state.fail_commits {
                for id in self.held_locks.drain(..) {
                    state.locks.remove(&id);
                }
                self.pending.clear();
                return Err(MarketError::database("injected commit failure"));
            }
            for write in self.pending.drain(..) {
                match write {
                    Pending::Rent(rent) => state.rents.push(rent),
                    Pending::Sale(sale) => {
                        // unique constraint on product_id
                        if state.sales.iter().any(|s| s.product_id == sale.product_id) {
                            for id in self.held_locks.drain(..) {
                                state.locks.remove(&id);
                            }
                            return Err(MarketError::database(
                                "duplicate key value violates unique constraint \"sales_product_id_key\"",
                            ));
                        }
                        state.sales.push(sale);
                    }
                    Pending::Status { product_id, status } => {
                        if let Some(product) = state.products.get_mut(&product_id) {
                            product.status = status;
                            product.updated_at = Utc::now();
                        }
                    }
                    Pending::Audit(entry) => state.audits.push(entry),
                }
            }
        }
        self.release_locks().await;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> MarketResult<()> {
        self.finished = true;
        self.pending.clear();
        self.release_locks().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lock_is_exclusive_until_released() {
        let store = MockBookingStore::new();

        let mut first = store.begin().await.unwrap();
        let mut second = store.begin().await.unwrap();

        assert!(first.try_lock_product(1).await.unwrap());
        assert!(!second.try_lock_product(1).await.unwrap());

        first.rollback().await.unwrap();
        assert!(second.try_lock_product(1).await.unwrap());
        second.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn writes_stay_invisible_until_commit() {
        let store = MockBookingStore::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert_rent(NewRent {
            product_id: 1,
            renter_id: 2,
            owner_id: 3,
            rent_price: rust_decimal::Decimal::new(500, 2),
            start_date: "2030-01-01".parse().unwrap(),
            end_date: "2030-01-03".parse().unwrap(),
        })
        .await
        .unwrap();

        assert!(store.rents().await.is_empty());
        tx.commit().await.unwrap();
        assert_eq!(store.rents().await.len(), 1);
    }

    #[tokio::test]
    async fn rollback_discards_buffered_writes() {
        let store = MockBookingStore::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert_sale(NewSale {
            product_id: 1,
            buyer_id: 2,
            seller_id: 3,
            price: rust_decimal::Decimal::new(10000, 2),
        })
        .await
        .unwrap();
        tx.rollback().await.unwrap();

        assert!(store.sales().await.is_empty());
    }
}
