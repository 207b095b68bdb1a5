use serde::{Deserialize, Serialize};

use crate::entities::{check_email, check_url, max_len, require, Draft, Resource};
use crate::envelope::FieldErrors;

/// A legal company owning establishments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub legal_name: Option<String>,
    pub tax_id: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyDraft {
    pub name: String,
    pub legal_name: Option<String>,
    pub tax_id: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
}

impl Default for CompanyDraft {
    fn default() -> Self {
        CompanyDraft {
            name: String::new(),
            legal_name: None,
            tax_id: String::new(),
            email: None,
            website: None,
            is_active: true,
        }
    }
}

impl From<&Company> for CompanyDraft {
    fn from(company: &Company) -> Self {
        CompanyDraft {
            name: company.name.clone(),
            legal_name: company.legal_name.clone(),
            tax_id: company.tax_id.clone(),
            email: company.email.clone(),
            website: company.website.clone(),
            is_active: company.is_active,
        }
    }
}

impl Draft for CompanyDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name);
        max_len(&mut errors, "name", &self.name, 120);
        if let Some(legal_name) = &self.legal_name {
            max_len(&mut errors, "legal_name", legal_name, 160);
        }
        require(&mut errors, "tax_id", &self.tax_id);
        max_len(&mut errors, "tax_id", &self.tax_id, 32);
        if let Some(email) = &self.email {
            check_email(&mut errors, "email", email);
        }
        if let Some(website) = &self.website {
            check_url(&mut errors, "website", website);
        }
        errors
    }
}

impl Resource for Company {
    const ENDPOINT: &'static str = "companies";
    const NAME: &'static str = "company";
    // The company endpoints on the collaborating backend expect form
    // semantics (booleans as "1"/"0").
    const FORM_ENCODED: bool = true;

    type Draft = CompanyDraft;

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
    fn rejects_malformed_email_and_website() {
        let draft = CompanyDraft {
            name: "Acme".to_string(),
            tax_id: "ES-B1234".to_string(),
            email: Some("not-an-email".to_string()),
            website: Some("acme.example".to_string()),
            ..CompanyDraft::default()
        };

        let errors = draft.validate();

        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("website"));
    }
}
