//! Sales service tests over the in-memory booking store.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use tb_shared::types::pagination::PageRequest;

use crate::booking::MockBookingStore;
use crate::domain::entities::{AuditAction, Product, ProductStatus, RentalPeriod, Sale};
use crate::errors::MarketError;
use crate::repositories::MockSaleRepository;
use crate::services::sales::SalesService;

const OWNER: i64 = 1;
const BUYER: i64 = 2;

type TestService = SalesService<MockBookingStore, MockSaleRepository>;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn product(id: i64, status: ProductStatus) -> Product {
    let now = Utc::now();
    Product {
        id,
        title: "Film camera".into(),
        description: "35mm, serviced".into(),
        categories: vec!["photo".into()],
        purchase_price: dec("220.00"),
        rent_price: dec("15.00"),
        rental_period: RentalPeriod::Day,
        status,
        view_count: 0,
        owner_id: OWNER,
        created_at: now,
        updated_at: now,
    }
}

async fn setup() -> (MockBookingStore, TestService) {
    let store = MockBookingStore::new();
    store.seed_user(OWNER).await;
    store.seed_user(BUYER).await;
    let service = SalesService::new(Arc::new(store.clone()), Arc::new(MockSaleRepository::new()));
    (store, service)
}

#[tokio::test]
async fn buy_product_creates_sale_and_marks_product_sold() {
    let (store, service) = setup().await;
    store.seed_product(product(1, ProductStatus::Available)).await;

    let sale = service.buy_product(BUYER, 1).await.unwrap();
    assert_eq!(sale.product_id, 1);
    assert_eq!(sale.buyer_id, BUYER);
    assert_eq!(sale.seller_id, OWNER);
    assert_eq!(sale.price, dec("220.00"));

    assert_eq!(store.sales().await.len(), 1);
    assert_eq!(store.product(1).await.unwrap().status, ProductStatus::Sold);

    let audits = store.audits().await;
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, AuditAction::Create);
    assert_eq!(audits[0].entity_name, "Sale");
}

#[tokio::test]
async fn contended_lock_fails_fast() {
    let (store, service) = setup().await;
    store.seed_product(product(1, ProductStatus::Available)).await;
    store.hold_external_lock(1).await;

    let err = service.buy_product(BUYER, 1).await.unwrap_err();
    assert!(matches!(err, MarketError::ProductUnavailable));
    assert!(store.sales().await.is_empty());
}

#[tokio::test]
async fn sold_product_stays_sold() {
    let (store, service) = setup().await;
    store.seed_product(product(1, ProductStatus::Sold)).await;

    let err = service.buy_product(BUYER, 1).await.unwrap_err();
    assert!(matches!(err, MarketError::ProductUnavailable));
    assert!(store.sales().await.is_empty());
}

#[tokio::test]
async fn owner_cannot_buy_own_product() {
    let (store, service) = setup().await;
    store.seed_product(product(1, ProductStatus::Available)).await;

    let err = service.buy_product(OWNER, 1).await.unwrap_err();
    assert!(matches!(err, MarketError::ForbiddenSelfTransaction));
    assert_eq!(
        store.product(1).await.unwrap().status,
        ProductStatus::Available
    );
}

#[tokio::test]
async fn missing_product_or_buyer_is_not_found() {
    let (store, service) = setup().await;

    let err = service.buy_product(BUYER, 99).await.unwrap_err();
    assert!(matches!(err, MarketError::NotFound { .. }));

    store.seed_product(product(1, ProductStatus::Available)).await;
    let err = service.buy_product(77, 1).await.unwrap_err();
    assert!(matches!(err, MarketError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_buyers_produce_exactly_one_sale() {
    let store = MockBookingStore::new();
    store.seed_product(product(1, ProductStatus::Available)).await;
    store.seed_user(OWNER).await;

    let service = Arc::new(SalesService::new(
        Arc::new(store.clone()),
        Arc::new(MockSaleRepository::new()),
    ));

    let mut handles = Vec::new();
    for buyer in 10..18 {
        store.seed_user(buyer).await;
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(
            async move { service.buy_product(buyer, 1).await },
        ));
    }

    let mut won = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => won += 1,
            Err(err) => assert!(matches!(err, MarketError::ProductUnavailable)),
        }
    }

    assert_eq!(won, 1);
    assert_eq!(store.sales().await.len(), 1);
    assert_eq!(store.product(1).await.unwrap().status, ProductStatus::Sold);
}

#[tokio::test]
async fn failed_status_update_rolls_back_the_sale() {
    let (store, service) = setup().await;
    store.seed_product(product(1, ProductStatus::Available)).await;
    store.fail_status_updates(true).await;

    let err = service.buy_product(BUYER, 1).await.unwrap_err();
    assert!(matches!(err, MarketError::Database { .. }));

    assert!(store.sales().await.is_empty());
    assert!(store.audits().await.is_empty());
    assert_eq!(
        store.product(1).await.unwrap().status,
        ProductStatus::Available
    );

    // a later attempt on the intact product succeeds
    store.fail_status_updates(false).await;
    service.buy_product(BUYER, 1).await.unwrap();
}

#[tokio::test]
async fn failed_commit_leaves_no_sale_behind() {
    let (store, service) = setup().await;
    store.seed_product(product(1, ProductStatus::Available)).await;
    store.fail_commits(true).await;

    let err = service.buy_product(BUYER, 1).await.unwrap_err();
    assert!(matches!(err, MarketError::Database { .. }));
    assert!(store.sales().await.is_empty());
    assert_eq!(
        store.product(1).await.unwrap().status,
        ProductStatus::Available
    );
}

#[tokio::test]
async fn purchase_history_is_private() {
    let (_store, service) = setup().await;

    let err = service
        .get_bought_by_user(BUYER, OWNER, PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::Forbidden));

    let err = service
        .get_sold_by_user(OWNER, BUYER, PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::Forbidden));
}

#[tokio::test]
async fn sold_history_pages_with_metadata() {
    let store = MockBookingStore::new();
    let sales = MockSaleRepository::new();
    for id in 1..=3 {
        sales
            .seed(Sale {
                id,
                product_id: id,
                buyer_id: BUYER,
                seller_id: OWNER,
                price: dec("99.00"),
                created_at: Utc::now(),
            })
            .await;
    }
    let service = SalesService::new(Arc::new(store), Arc::new(sales));

    let page = service
        .get_sold_by_user(OWNER, OWNER, PageRequest::new(2, 2))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.total_items, 3);
    assert_eq!(page.meta.total_pages, 2);
    assert!(!page.meta.has_next_page);
    assert!(page.meta.has_previous_page);
}
