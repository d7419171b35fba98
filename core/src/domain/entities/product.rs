//! Product entity: a listed item that can be bought once or rented for
//! non-overlapping windows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a product.
///
/// `Sold` is absorbing: once a product is sold no further rent or sale may
/// ever succeed. `Rented` is not: a product returns to bookable as soon as a
/// non-overlapping window is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Available,
    Sold,
    Rented,
}

impl ProductStatus {
    /// Storage representation, matching the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "AVAILABLE",
            ProductStatus::Sold => "SOLD",
            ProductStatus::Rented => "RENTED",
        }
    }

    /// Parse the storage representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AVAILABLE" => Some(ProductStatus::Available),
            "SOLD" => Some(ProductStatus::Sold),
            "RENTED" => Some(ProductStatus::Rented),
            _ => None,
        }
    }
}

/// Billing unit the rent price refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RentalPeriod {
    Day,
    Week,
    Month,
}

impl RentalPeriod {
    /// Storage representation, matching the `rental_period` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalPeriod::Day => "DAY",
            RentalPeriod::Week => "WEEK",
            RentalPeriod::Month => "MONTH",
        }
    }

    /// Parse the storage representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DAY" => Some(RentalPeriod::Day),
            "WEEK" => Some(RentalPeriod::Week),
            "MONTH" => Some(RentalPeriod::Month),
            _ => None,
        }
    }
}

/// A listed product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Free-form category tags; listing queries filter on tag overlap
    pub categories: Vec<String>,
    pub purchase_price: Decimal,
    /// Price per rental period, not per booking
    pub rent_price: Decimal,
    pub rental_period: RentalPeriod,
    pub status: ProductStatus,
    pub view_count: i64,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product may still enter a booking at all.
    pub fn is_sold(&self) -> bool {
        self.status == ProductStatus::Sold
    }

    /// Whether catalog mutations (update/delete) are still allowed.
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }

    /// Whether `user_id` owns this product.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }

    /// Apply a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(purchase_price) = patch.purchase_price {
            self.purchase_price = purchase_price;
        }
        if let Some(rent_price) = patch.rent_price {
            self.rent_price = rent_price;
        }
        if let Some(rental_period) = patch.rental_period {
            self.rental_period = rental_period;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload for inserting a new product; the store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub purchase_price: Decimal,
    pub rent_price: Decimal,
    pub rental_period: RentalPeriod,
    pub owner_id: i64,
}

/// Partial update of the mutable product fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub purchase_price: Option<Decimal>,
    pub rent_price: Option<Decimal>,
    pub rental_period: Option<RentalPeriod>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.categories.is_none()
            && self.purchase_price.is_none()
            && self.rent_price.is_none()
            && self.rental_period.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            title: "Cordless drill".into(),
            description: "18V, two batteries".into(),
            categories: vec!["tools".into()],
            purchase_price: Decimal::new(12000, 2),
            rent_price: Decimal::new(700, 2),
            rental_period: RentalPeriod::Day,
            status: ProductStatus::Available,
            view_count: 0,
            owner_id: 42,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn status_round_trips_through_storage_form() {
        for status in [
            ProductStatus::Available,
            ProductStatus::Sold,
            ProductStatus::Rented,
        ] {
            assert_eq!(ProductStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProductStatus::parse("UNKNOWN"), None);
    }

    #[test]
    fn rental_period_round_trips_through_storage_form() {
        for period in [RentalPeriod::Day, RentalPeriod::Week, RentalPeriod::Month] {
            assert_eq!(RentalPeriod::parse(period.as_str()), Some(period));
        }
    }

    #[test]
    fn sold_product_is_not_available() {
        let mut p = product();
        assert!(p.is_available());
        p.status = ProductStatus::Sold;
        assert!(p.is_sold());
        assert!(!p.is_available());
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut p = product();
        let before = p.clone();
        p.apply(ProductPatch {
            title: Some("Hammer drill".into()),
            rent_price: Some(Decimal::new(900, 2)),
            ..Default::default()
        });
        assert_eq!(p.title, "Hammer drill");
        assert_eq!(p.rent_price, Decimal::new(900, 2));
        assert_eq!(p.description, before.description);
        assert_eq!(p.purchase_price, before.purchase_price);
    }

    #[test]
    fn empty_patch_is_detectable() {
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch {
            title: Some("x".into()),
            ..Default::default()
        }
        .is_empty());
    }
}
