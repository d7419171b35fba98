//! Catalog service tests over the in-memory repositories.

use std::sync::Arc;

use rust_decimal::Decimal;

use tb_shared::types::pagination::PageRequest;

use crate::domain::entities::{
    AuditAction, NewProduct, ProductPatch, ProductStatus, RentalPeriod,
};
use crate::errors::MarketError;
use crate::repositories::{MockAuditRepository, MockProductRepository};
use crate::services::catalog::CatalogService;

const OWNER: i64 = 1;
const STRANGER: i64 = 2;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn new_product(title: &str, categories: &[&str]) -> NewProduct {
    NewProduct {
        title: title.into(),
        description: "well kept".into(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        purchase_price: dec("100.00"),
        rent_price: dec("10.00"),
        rental_period: RentalPeriod::Day,
        owner_id: 0, // overwritten by the service
    }
}

fn setup() -> (
    Arc<MockProductRepository>,
    Arc<MockAuditRepository>,
    CatalogService<MockProductRepository, MockAuditRepository>,
) {
    let products = Arc::new(MockProductRepository::new());
    let audit = Arc::new(MockAuditRepository::new());
    let service = CatalogService::new(Arc::clone(&products), Arc::clone(&audit));
    (products, audit, service)
}

#[tokio::test]
async fn created_product_starts_available_with_zero_views() {
    let (_products, audit, service) = setup();
    let product = service
        .create_product(OWNER, new_product("Tent", &["outdoor"]))
        .await
        .unwrap();

    assert_eq!(product.owner_id, OWNER);
    assert_eq!(product.status, ProductStatus::Available);
    assert_eq!(product.view_count, 0);

    let records = audit.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, AuditAction::Create);
    assert_eq!(records[0].entity_name, "Product");
    assert_eq!(records[0].actor_id, OWNER);
}

#[tokio::test]
async fn get_missing_product_is_not_found() {
    let (_products, _audit, service) = setup();
    let err = service.get_product(404).await.unwrap_err();
    assert!(matches!(err, MarketError::NotFound { .. }));
}

#[tokio::test]
async fn only_the_owner_may_update() {
    let (_products, _audit, service) = setup();
    let product = service
        .create_product(OWNER, new_product("Kayak", &["outdoor"]))
        .await
        .unwrap();

    let err = service
        .update_product(
            product.id,
            STRANGER,
            ProductPatch {
                title: Some("Stolen kayak".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::Forbidden));
}

#[tokio::test]
async fn update_is_blocked_once_product_left_available() {
    let (products, _audit, service) = setup();
    let product = service
        .create_product(OWNER, new_product("Kayak", &["outdoor"]))
        .await
        .unwrap();

    let mut rented = products.get(product.id).await.unwrap();
    rented.status = ProductStatus::Rented;
    products.seed(rented).await;

    let err = service
        .update_product(
            product.id,
            OWNER,
            ProductPatch {
                title: Some("Kayak v2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::InvalidState { .. }));
}

#[tokio::test]
async fn empty_patch_is_a_validation_error() {
    let (_products, _audit, service) = setup();
    let product = service
        .create_product(OWNER, new_product("Kayak", &[]))
        .await
        .unwrap();

    let err = service
        .update_product(product.id, OWNER, ProductPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::Validation { .. }));
}

#[tokio::test]
async fn update_changes_fields_and_records_both_snapshots() {
    let (_products, audit, service) = setup();
    let product = service
        .create_product(OWNER, new_product("Ladder", &["tools"]))
        .await
        .unwrap();

    let updated = service
        .update_product(
            product.id,
            OWNER,
            ProductPatch {
                title: Some("Telescopic ladder".into()),
                rent_price: Some(dec("12.50")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Telescopic ladder");
    assert_eq!(updated.rent_price, dec("12.50"));

    let records = audit.records().await;
    let update = records
        .iter()
        .find(|r| r.action == AuditAction::Update)
        .unwrap();
    assert_eq!(
        update.previous_state.as_ref().unwrap()["title"],
        "Ladder"
    );
    assert_eq!(
        update.current_state.as_ref().unwrap()["title"],
        "Telescopic ladder"
    );
}

#[tokio::test]
async fn delete_is_owner_only_and_available_only() {
    let (products, audit, service) = setup();
    let product = service
        .create_product(OWNER, new_product("Drone", &["photo"]))
        .await
        .unwrap();

    let err = service.delete_product(product.id, STRANGER).await.unwrap_err();
    assert!(matches!(err, MarketError::Forbidden));

    let mut sold = products.get(product.id).await.unwrap();
    sold.status = ProductStatus::Sold;
    products.seed(sold).await;
    let err = service.delete_product(product.id, OWNER).await.unwrap_err();
    assert!(matches!(err, MarketError::InvalidState { .. }));

    let mut back = products.get(product.id).await.unwrap();
    back.status = ProductStatus::Available;
    products.seed(back).await;
    service.delete_product(product.id, OWNER).await.unwrap();
    assert!(products.get(product.id).await.is_none());

    let records = audit.records().await;
    assert!(records.iter().any(|r| r.action == AuditAction::Delete));
}

#[tokio::test]
async fn view_counter_increments_atomically_per_call() {
    let (_products, _audit, service) = setup();
    let product = service
        .create_product(OWNER, new_product("Amp", &["music"]))
        .await
        .unwrap();

    service.increment_views(product.id).await.unwrap();
    let viewed = service.increment_views(product.id).await.unwrap();
    assert_eq!(viewed.view_count, 2);

    let err = service.increment_views(404).await.unwrap_err();
    assert!(matches!(err, MarketError::NotFound { .. }));
}

#[tokio::test]
async fn listing_filters_by_overlapping_categories() {
    let (_products, _audit, service) = setup();
    service
        .create_product(OWNER, new_product("Tent", &["outdoor", "camping"]))
        .await
        .unwrap();
    service
        .create_product(OWNER, new_product("Mixer", &["music"]))
        .await
        .unwrap();

    let all = service
        .list_products(None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.meta.total_items, 2);

    let outdoor = service
        .list_products(Some(vec!["camping".into(), "boats".into()]), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(outdoor.meta.total_items, 1);
    assert_eq!(outdoor.data[0].title, "Tent");

    let none = service
        .list_products(Some(vec!["cars".into()]), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(none.meta.total_items, 0);
    assert_eq!(none.meta.total_pages, 0);
}

#[tokio::test]
async fn owner_listing_is_scoped_and_paged() {
    let (_products, _audit, service) = setup();
    for i in 0..3 {
        service
            .create_product(OWNER, new_product(&format!("Item {i}"), &[]))
            .await
            .unwrap();
    }
    service
        .create_product(STRANGER, new_product("Other", &[]))
        .await
        .unwrap();

    let page = service
        .list_products_by_owner(OWNER, PageRequest::new(1, 2))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total_items, 3);
    assert_eq!(page.meta.total_pages, 2);
    assert!(page.data.iter().all(|p| p.owner_id == OWNER));
}
