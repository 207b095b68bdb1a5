use serde::{Deserialize, Serialize};

use crate::entities::{max_len, push_error, require, Draft, Resource};
use crate::envelope::FieldErrors;

/// A sellable or purchasable product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    /// Unit of measure, e.g. "ea", "kg"
    pub unit: Option<String>,
    /// Unit price in minor currency units
    pub unit_price_cents: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub unit: Option<String>,
    pub unit_price_cents: i64,
    pub is_active: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        ProductDraft {
            sku: String::new(),
            name: String::new(),
            unit: None,
            unit_price_cents: 0,
            is_active: true,
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        ProductDraft {
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit: product.unit.clone(),
            unit_price_cents: product.unit_price_cents,
            is_active: product.is_active,
        }
    }
}

impl Draft for ProductDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "sku", &self.sku);
        max_len(&mut errors, "sku", &self.sku, 40);
        require(&mut errors, "name", &self.name);
        max_len(&mut errors, "name", &self.name, 160);
        if let Some(unit) = &self.unit {
            max_len(&mut errors, "unit", unit, 16);
        }
        if self.unit_price_cents < 0 {
            push_error(&mut errors, "unit_price_cents", "unit price must not be negative");
        }
        errors
    }
}

impl Resource for Product {
    const ENDPOINT: &'static str = "products";
    const NAME: &'static str = "product";

    type Draft = ProductDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn deleted_at(&self) -> Option<i64> {
        self.deleted_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let draft = ProductDraft {
            sku: "WID-1".to_string(),
            name: "Widget".to_string(),
            unit_price_cents: -100,
            ..ProductDraft::default()
        };

        assert!(draft.validate().contains_key("unit_price_cents"));
    }
}
