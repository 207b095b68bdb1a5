use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::{check_date, max_len, push_error, require, Draft, Resource};
use crate::envelope::FieldErrors;

/// A recorded purchase from a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    pub id: String,
    pub supplier_id: String,
    /// Supplier invoice or order reference
    pub reference: String,
    /// Total in minor currency units
    pub total_cents: i64,
    pub status: PurchaseStatus,
    /// ISO 8601 date (YYYY-MM-DD)
    pub purchased_on: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    #[default]
    Draft,
    Confirmed,
    Received,
    Cancelled,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Draft => "draft",
            PurchaseStatus::Confirmed => "confirmed",
            PurchaseStatus::Received => "received",
            PurchaseStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PurchaseStatus::Draft),
            "confirmed" => Ok(PurchaseStatus::Confirmed),
            "received" => Ok(PurchaseStatus::Received),
            "cancelled" => Ok(PurchaseStatus::Cancelled),
            other => Err(format!("unknown purchase status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PurchaseDraft {
    pub supplier_id: String,
    pub reference: String,
    pub total_cents: i64,
    pub status: PurchaseStatus,
    pub purchased_on: Option<String>,
}

impl From<&Purchase> for PurchaseDraft {
    fn from(purchase: &Purchase) -> Self {
        PurchaseDraft {
            supplier_id: purchase.supplier_id.clone(),
            reference: purchase.reference.clone(),
            total_cents: purchase.total_cents,
            status: purchase.status,
            purchased_on: purchase.purchased_on.clone(),
        }
    }
}

impl Draft for PurchaseDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "supplier_id", &self.supplier_id);
        require(&mut errors, "reference", &self.reference);
        max_len(&mut errors, "reference", &self.reference, 64);
        if self.total_cents <= 0 {
            push_error(&mut errors, "total_cents", "total must be positive");
        }
        if let Some(purchased_on) = &self.purchased_on {
            check_date(&mut errors, "purchased_on", purchased_on);
        }
        errors
    }
}

impl Resource for Purchase {
    const ENDPOINT: &'static str = "purchases";
    const NAME: &'static str = "purchase";

    type Draft = PurchaseDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn deleted_at(&self) -> Option<i64> {
        self.deleted_at
    }
}
