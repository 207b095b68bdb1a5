use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::{max_len, require, Draft, Resource};
use crate::envelope::FieldErrors;

/// A ledger account in the chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// ULID (sortable, globally unique)
    pub id: String,
    /// Short ledger code, e.g. "1100"
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    pub is_active: bool,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
    /// Unix timestamp in milliseconds
    pub updated_at: i64,
    /// Unix timestamp in milliseconds (None = active, Some = deleted)
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    #[default]
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Asset => "asset",
            AccountKind::Liability => "liability",
            AccountKind::Equity => "equity",
            AccountKind::Income => "income",
            AccountKind::Expense => "expense",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(AccountKind::Asset),
            "liability" => Ok(AccountKind::Liability),
            "equity" => Ok(AccountKind::Equity),
            "income" => Ok(AccountKind::Income),
            "expense" => Ok(AccountKind::Expense),
            other => Err(format!("unknown account kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountDraft {
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    pub is_active: bool,
}

impl Default for AccountDraft {
    fn default() -> Self {
        AccountDraft {
            code: String::new(),
            name: String::new(),
            kind: AccountKind::default(),
            is_active: true,
        }
    }
}

impl From<&Account> for AccountDraft {
    fn from(account: &Account) -> Self {
        AccountDraft {
            code: account.code.clone(),
            name: account.name.clone(),
            kind: account.kind,
            is_active: account.is_active,
        }
    }
}

impl Draft for AccountDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "code", &self.code);
        max_len(&mut errors, "code", &self.code, 16);
        require(&mut errors, "name", &self.name);
        max_len(&mut errors, "name", &self.name, 120);
        errors
    }
}

impl Resource for Account {
    const ENDPOINT: &'static str = "accounts";
    const NAME: &'static str = "account";

    type Draft = AccountDraft;

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
    fn draft_requires_code_and_name() {
        let errors = AccountDraft::default().validate();

        assert!(errors.contains_key("code"));
        assert!(errors.contains_key("name"));
    }

    #[test]
    fn valid_draft_passes() {
        let draft = AccountDraft {
            code: "1100".to_string(),
            name: "Accounts receivable".to_string(),
            ..AccountDraft::default()
        };

        assert!(draft.validate().is_empty());
    }
}
