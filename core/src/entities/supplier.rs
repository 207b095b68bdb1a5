use serde::{Deserialize, Serialize};

use crate::entities::{check_email, max_len, require, Draft, Resource};
use crate::envelope::FieldErrors;

/// A supplier purchases are recorded against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierDraft {
    pub name: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl Default for SupplierDraft {
    fn default() -> Self {
        SupplierDraft {
            name: String::new(),
            tax_id: None,
            email: None,
            phone: None,
            is_active: true,
        }
    }
}

impl From<&Supplier> for SupplierDraft {
    fn from(supplier: &Supplier) -> Self {
        SupplierDraft {
            name: supplier.name.clone(),
            tax_id: supplier.tax_id.clone(),
            email: supplier.email.clone(),
            phone: supplier.phone.clone(),
            is_active: supplier.is_active,
        }
    }
}

impl Draft for SupplierDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name);
        max_len(&mut errors, "name", &self.name, 120);
        if let Some(tax_id) = &self.tax_id {
            max_len(&mut errors, "tax_id", tax_id, 32);
        }
        if let Some(email) = &self.email {
            check_email(&mut errors, "email", email);
        }
        if let Some(phone) = &self.phone {
            max_len(&mut errors, "phone", phone, 32);
        }
        errors
    }
}

impl Resource for Supplier {
    const ENDPOINT: &'static str = "suppliers";
    const NAME: &'static str = "supplier";

    type Draft = SupplierDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn deleted_at(&self) -> Option<i64> {
        self.deleted_at
    }
}
