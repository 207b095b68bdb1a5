use serde::{Deserialize, Serialize};

use crate::entities::{max_len, require, Draft, Resource};
use crate::envelope::FieldErrors;

/// A physical location belonging to a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Establishment {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstablishmentDraft {
    pub company_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl Default for EstablishmentDraft {
    fn default() -> Self {
        EstablishmentDraft {
            company_id: String::new(),
            name: String::new(),
            address: None,
            phone: None,
            is_active: true,
        }
    }
}

impl From<&Establishment> for EstablishmentDraft {
    fn from(establishment: &Establishment) -> Self {
        EstablishmentDraft {
            company_id: establishment.company_id.clone(),
            name: establishment.name.clone(),
            address: establishment.address.clone(),
            phone: establishment.phone.clone(),
            is_active: establishment.is_active,
        }
    }
}

impl Draft for EstablishmentDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "company_id", &self.company_id);
        require(&mut errors, "name", &self.name);
        max_len(&mut errors, "name", &self.name, 120);
        if let Some(address) = &self.address {
            max_len(&mut errors, "address", address, 240);
        }
        if let Some(phone) = &self.phone {
            max_len(&mut errors, "phone", phone, 32);
        }
        errors
    }
}

impl Resource for Establishment {
    const ENDPOINT: &'static str = "establishments";
    const NAME: &'static str = "establishment";

    type Draft = EstablishmentDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn deleted_at(&self) -> Option<i64> {
        self.deleted_at
    }
}
