use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use tally_core::{
    AccountDraft, AccountKind, CompanyDraft, EstablishmentDraft, ProductDraft, PurchaseDraft,
    PurchaseStatus, SupplierDraft,
};

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about,
    long_about = "Terminal client for the tally admin backend"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Path to profile configuration file
    #[arg(long, short, env = "TALLY_PROFILE")]
    pub profile_path: Option<String>,

    /// Server base URL override
    #[arg(long, env = "TALLY_SERVER_URL")]
    pub server_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Initializes a new profile
    Init,
    /// Chart of accounts subcommands
    #[clap(subcommand)]
    Account(AccountCommand),
    /// Company subcommands
    #[clap(subcommand)]
    Company(CompanyCommand),
    /// Establishment subcommands
    #[clap(subcommand)]
    Establishment(EstablishmentCommand),
    /// Product subcommands
    #[clap(subcommand)]
    Product(ProductCommand),
    /// Supplier subcommands
    #[clap(subcommand)]
    Supplier(SupplierCommand),
    /// Purchase subcommands
    #[clap(subcommand)]
    Purchase(PurchaseCommand),
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Pretty,
    Plain,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Pretty
    }
}

#[derive(Debug, Clone, Args)]
#[command(about = "List one page of a collection")]
pub struct ListArgs {
    /// Search term
    #[arg(default_value = None)]
    pub term: Option<String>,

    /// Page to fetch
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page (defaults to the profile setting)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Extra filter as key=value (can be specified multiple times)
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filter: Vec<(String, String)>,

    /// Print the last cached page instead of contacting the server
    #[arg(long, default_value_t = false)]
    pub cached: bool,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the record to delete
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', default_value_t = false)]
    pub yes: bool,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

fn parse_account_kind(raw: &str) -> Result<AccountKind, String> {
    raw.parse()
}

fn parse_purchase_status(raw: &str) -> Result<PurchaseStatus, String> {
    raw.parse()
}

fn parse_iso_date(raw: &str) -> Result<String, String> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| raw.to_string())
        .map_err(|_| format!("expected YYYY-MM-DD, got '{}'", raw))
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// List accounts
    List(ListArgs),
    /// Create an account
    Create(AccountFields),
    /// Update an account
    Update(AccountUpdateArgs),
    /// Delete an account (soft delete)
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct AccountFields {
    /// Short ledger code, e.g. 1100
    pub code: String,
    /// Display name
    pub name: String,
    /// Account kind (asset, liability, equity, income, expense)
    #[arg(long, value_parser = parse_account_kind, default_value_t = AccountKind::Asset)]
    pub kind: AccountKind,
    /// Create as inactive
    #[arg(long, default_value_t = false)]
    pub inactive: bool,
}

impl AccountFields {
    pub fn into_draft(self) -> AccountDraft {
        AccountDraft {
            code: self.code,
            name: self.name,
            kind: self.kind,
            is_active: !self.inactive,
        }
    }
}

#[derive(Debug, Args)]
pub struct AccountUpdateArgs {
    /// Id of the account to update
    pub id: String,
    #[command(flatten)]
    pub fields: AccountFields,
}

#[derive(Debug, Subcommand)]
pub enum CompanyCommand {
    /// List companies
    List(ListArgs),
    /// Create a company
    Create(CompanyFields),
    /// Update a company
    Update(CompanyUpdateArgs),
    /// Delete a company (soft delete)
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct CompanyFields {
    /// Display name
    pub name: String,
    /// Tax identifier
    pub tax_id: String,
    /// Registered legal name
    #[arg(long)]
    pub legal_name: Option<String>,
    /// Billing email
    #[arg(long)]
    pub email: Option<String>,
    /// Website URL
    #[arg(long)]
    pub website: Option<String>,
    /// Create as inactive
    #[arg(long, default_value_t = false)]
    pub inactive: bool,
}

impl CompanyFields {
    pub fn into_draft(self) -> CompanyDraft {
        CompanyDraft {
            name: self.name,
            legal_name: self.legal_name,
            tax_id: self.tax_id,
            email: self.email,
            website: self.website,
            is_active: !self.inactive,
        }
    }
}

#[derive(Debug, Args)]
pub struct CompanyUpdateArgs {
    /// Id of the company to update
    pub id: String,
    #[command(flatten)]
    pub fields: CompanyFields,
}

#[derive(Debug, Subcommand)]
pub enum EstablishmentCommand {
    /// List establishments
    List(ListArgs),
    /// Create an establishment
    Create(EstablishmentFields),
    /// Update an establishment
    Update(EstablishmentUpdateArgs),
    /// Delete an establishment (soft delete)
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct EstablishmentFields {
    /// Owning company id
    pub company_id: String,
    /// Display name
    pub name: String,
    /// Street address
    #[arg(long)]
    pub address: Option<String>,
    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,
    /// Create as inactive
    #[arg(long, default_value_t = false)]
    pub inactive: bool,
}

impl EstablishmentFields {
    pub fn into_draft(self) -> EstablishmentDraft {
        EstablishmentDraft {
            company_id: self.company_id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            is_active: !self.inactive,
        }
    }
}

#[derive(Debug, Args)]
pub struct EstablishmentUpdateArgs {
    /// Id of the establishment to update
    pub id: String,
    #[command(flatten)]
    pub fields: EstablishmentFields,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products
    List(ListArgs),
    /// Create a product
    Create(ProductFields),
    /// Update a product
    Update(ProductUpdateArgs),
    /// Delete a product (soft delete)
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct ProductFields {
    /// Stock keeping unit
    pub sku: String,
    /// Display name
    pub name: String,
    /// Unit of measure, e.g. ea, kg
    #[arg(long)]
    pub unit: Option<String>,
    /// Unit price in minor currency units
    #[arg(long, default_value_t = 0)]
    pub price_cents: i64,
    /// Create as inactive
    #[arg(long, default_value_t = false)]
    pub inactive: bool,
}

impl ProductFields {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            sku: self.sku,
            name: self.name,
            unit: self.unit,
            unit_price_cents: self.price_cents,
            is_active: !self.inactive,
        }
    }
}

#[derive(Debug, Args)]
pub struct ProductUpdateArgs {
    /// Id of the product to update
    pub id: String,
    #[command(flatten)]
    pub fields: ProductFields,
}

#[derive(Debug, Subcommand)]
pub enum SupplierCommand {
    /// List suppliers
    List(ListArgs),
    /// Create a supplier
    Create(SupplierFields),
    /// Update a supplier
    Update(SupplierUpdateArgs),
    /// Delete a supplier (soft delete)
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct SupplierFields {
    /// Display name
    pub name: String,
    /// Tax identifier
    #[arg(long)]
    pub tax_id: Option<String>,
    /// Contact email
    #[arg(long)]
    pub email: Option<String>,
    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,
    /// Create as inactive
    #[arg(long, default_value_t = false)]
    pub inactive: bool,
}

impl SupplierFields {
    pub fn into_draft(self) -> SupplierDraft {
        SupplierDraft {
            name: self.name,
            tax_id: self.tax_id,
            email: self.email,
            phone: self.phone,
            is_active: !self.inactive,
        }
    }
}

#[derive(Debug, Args)]
pub struct SupplierUpdateArgs {
    /// Id of the supplier to update
    pub id: String,
    #[command(flatten)]
    pub fields: SupplierFields,
}

#[derive(Debug, Subcommand)]
pub enum PurchaseCommand {
    /// List purchases
    List(ListArgs),
    /// Record a purchase
    Create(PurchaseFields),
    /// Update a purchase
    Update(PurchaseUpdateArgs),
    /// Delete a purchase (soft delete)
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct PurchaseFields {
    /// Supplier id
    pub supplier_id: String,
    /// Supplier invoice or order reference
    pub reference: String,
    /// Total in minor currency units
    #[arg(long)]
    pub total_cents: i64,
    /// Status (draft, confirmed, received, cancelled)
    #[arg(long, value_parser = parse_purchase_status, default_value_t = PurchaseStatus::Draft)]
    pub status: PurchaseStatus,
    /// Purchase date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub date: Option<String>,
}

impl PurchaseFields {
    pub fn into_draft(self) -> PurchaseDraft {
        PurchaseDraft {
            supplier_id: self.supplier_id,
            reference: self.reference,
            total_cents: self.total_cents,
            status: self.status,
            purchased_on: self.date,
        }
    }
}

#[derive(Debug, Args)]
pub struct PurchaseUpdateArgs {
    /// Id of the purchase to update
    pub id: String,
    #[command(flatten)]
    pub fields: PurchaseFields,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn filter_parser_requires_key() {
        assert_eq!(
            parse_filter("is_active=1").unwrap(),
            ("is_active".to_string(), "1".to_string())
        );
        assert!(parse_filter("novalue").is_err());
        assert!(parse_filter("=1").is_err());
    }

    #[test]
    fn date_parser_accepts_iso_only() {
        assert_eq!(parse_iso_date("2024-03-16").unwrap(), "2024-03-16");
        assert!(parse_iso_date("03/16/2024").is_err());
    }

    #[test]
    fn inactive_flag_inverts_into_draft() {
        let fields = AccountFields {
            code: "1100".to_string(),
            name: "Cash".to_string(),
            kind: AccountKind::Asset,
            inactive: true,
        };

        assert!(!fields.into_draft().is_active);
    }
}
