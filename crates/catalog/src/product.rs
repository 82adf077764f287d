//! Product model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbridge_core::{DomainError, DomainResult, Price, ProductId};

/// A catalog product. Never carries a stock quantity; that belongs to the
/// ledger and is merged in at read time (`view::combine`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for product creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
}

/// Input for a full product update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
}

impl Product {
    /// Build a new product with a fresh identifier.
    pub fn create(input: NewProduct, now: DateTime<Utc>) -> DomainResult<Self> {
        validate_name(&input.name)?;
        Ok(Self {
            id: ProductId::new(),
            name: input.name,
            description: input.description,
            price: input.price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the mutable fields, keeping identity and creation time.
    pub fn apply_update(&mut self, update: UpdateProduct, now: DateTime<Utc>) -> DomainResult<()> {
        validate_name(&update.name)?;
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.updated_at = now;
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: "9.99".parse().unwrap(),
        }
    }

    #[test]
    fn create_assigns_id_and_stamps() {
        let now = Utc::now();
        let product = Product::create(widget(), now).unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, Price::from_minor_units(999));
        assert_eq!(product.created_at, now);
        assert_eq!(product.updated_at, now);
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut input = widget();
        input.name = "   ".to_string();
        let err = Product::create(input, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_replaces_fields_and_bumps_updated_at() {
        let created = Utc::now();
        let mut product = Product::create(widget(), created).unwrap();
        let id = product.id;

        let later = created + chrono::Duration::seconds(5);
        product
            .apply_update(
                UpdateProduct {
                    name: "Widget Mk2".to_string(),
                    description: String::new(),
                    price: "12.50".parse().unwrap(),
                },
                later,
            )
            .unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Widget Mk2");
        assert_eq!(product.price, Price::from_minor_units(1250));
        assert_eq!(product.created_at, created);
        assert_eq!(product.updated_at, later);
    }

    #[test]
    fn update_rejects_blank_name() {
        let mut product = Product::create(widget(), Utc::now()).unwrap();
        let err = product
            .apply_update(
                UpdateProduct {
                    name: String::new(),
                    description: String::new(),
                    price: Price::ZERO,
                },
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
