//! Product catalog payloads.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use tb_core::domain::entities::{NewProduct, ProductPatch, RentalPeriod};
use tb_core::errors::MarketError;
use tb_shared::types::pagination::PageRequest;

use crate::error::ApiError;

/// Body of `POST /api/v1/products`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1 to 255 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: String,

    #[validate(length(min = 1, message = "at least one category is required"))]
    pub categories: Vec<String>,

    pub purchase_price: Decimal,
    pub rent_price: Decimal,
    pub rental_period: RentalPeriod,
}

impl CreateProductRequest {
    /// Validate and convert into the domain payload. The owner is taken from
    /// the caller identity, never from the body.
    pub fn into_new_product(self) -> Result<NewProduct, ApiError> {
        self.validate().map_err(ApiError::from_validation)?;
        if self.purchase_price <= Decimal::ZERO || self.rent_price <= Decimal::ZERO {
            return Err(MarketError::validation("prices must be positive").into());
        }
        Ok(NewProduct {
            title: self.title,
            description: self.description,
            categories: self.categories,
            purchase_price: self.purchase_price,
            rent_price: self.rent_price,
            rental_period: self.rental_period,
            owner_id: 0,
        })
    }
}

/// Body of `PATCH /api/v1/products/{id}`. Absent fields stay untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1 to 255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "at least one category is required"))]
    pub categories: Option<Vec<String>>,

    pub purchase_price: Option<Decimal>,
    pub rent_price: Option<Decimal>,
    pub rental_period: Option<RentalPeriod>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> Result<ProductPatch, ApiError> {
        self.validate().map_err(ApiError::from_validation)?;
        let positive = |price: Option<Decimal>| price.map_or(true, |p| p > Decimal::ZERO);
        if !positive(self.purchase_price) || !positive(self.rent_price) {
            return Err(MarketError::validation("prices must be positive").into());
        }
        Ok(ProductPatch {
            title: self.title,
            description: self.description,
            categories: self.categories,
            purchase_price: self.purchase_price,
            rent_price: self.rent_price,
            rental_period: self.rental_period,
        })
    }
}

/// Query string of `GET /api/v1/products`.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,

    /// Comma-separated category tags; a product matches when it carries at
    /// least one of them.
    pub categories: Option<String>,
}

impl ListProductsQuery {
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.limit),
        )
    }

    pub fn categories(&self) -> Option<Vec<String>> {
        let tags: Vec<String> = self
            .categories
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        if tags.is_empty() {
            None
        } else {
            Some(tags)
        }
    }
}
