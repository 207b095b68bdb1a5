use rusqlite::Connection;
use std::path::Path;
use tracing::info;

use tally_core::FilterValue;

pub mod account;
pub mod company;
pub mod establishment;
pub mod product;
pub mod purchase;
pub mod supplier;

/// Base schema: one table per collection, soft delete via `deleted_at`.
const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id TEXT PRIMARY KEY NOT NULL,
    code TEXT NOT NULL,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    is_active INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    deleted_at INTEGER
);

CREATE TABLE IF NOT EXISTS companies (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    legal_name TEXT,
    tax_id TEXT NOT NULL,
    email TEXT,
    website TEXT,
    is_active INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    deleted_at INTEGER
);

CREATE TABLE IF NOT EXISTS establishments (
    id TEXT PRIMARY KEY NOT NULL,
    company_id TEXT NOT NULL,
    name TEXT NOT NULL,
    address TEXT,
    phone TEXT,
    is_active INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    deleted_at INTEGER
);

CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY NOT NULL,
    sku TEXT NOT NULL,
    name TEXT NOT NULL,
    unit TEXT,
    unit_price_cents INTEGER NOT NULL,
    is_active INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    deleted_at INTEGER
);

CREATE TABLE IF NOT EXISTS suppliers (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    tax_id TEXT,
    email TEXT,
    phone TEXT,
    is_active INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    deleted_at INTEGER
);

CREATE TABLE IF NOT EXISTS purchases (
    id TEXT PRIMARY KEY NOT NULL,
    supplier_id TEXT NOT NULL,
    reference TEXT NOT NULL,
    total_cents INTEGER NOT NULL,
    status TEXT NOT NULL,
    purchased_on TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    deleted_at INTEGER
);

PRAGMA user_version = 1;
"#;

/// Migration from V1 to V2: indexes for the soft-delete scans and the
/// common filter columns.
const MIGRATION_V1_TO_V2: &str = r#"
CREATE INDEX IF NOT EXISTS idx_accounts_deleted_at ON accounts(deleted_at);
CREATE INDEX IF NOT EXISTS idx_companies_deleted_at ON companies(deleted_at);
CREATE INDEX IF NOT EXISTS idx_establishments_deleted_at ON establishments(deleted_at);
CREATE INDEX IF NOT EXISTS idx_products_deleted_at ON products(deleted_at);
CREATE INDEX IF NOT EXISTS idx_suppliers_deleted_at ON suppliers(deleted_at);
CREATE INDEX IF NOT EXISTS idx_purchases_deleted_at ON purchases(deleted_at);

CREATE INDEX IF NOT EXISTS idx_establishments_company_id ON establishments(company_id);
CREATE INDEX IF NOT EXISTS idx_purchases_supplier_id ON purchases(supplier_id);
CREATE INDEX IF NOT EXISTS idx_purchases_status ON purchases(status);

PRAGMA user_version = 2;
"#;

/// Open or create the console database at the specified path.
pub fn open_db(path: &Path) -> Result<Connection, rusqlite::Error> {
    info!("Setting up database at {:?}", path);
    let conn = Connection::open(path)?;
    migrate(&conn)?;
    info!("Database ready");
    Ok(conn)
}

/// Run migrations to bring the database to the current schema version.
pub fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    let mut version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version == 0 {
        conn.execute_batch(SCHEMA_V1)?;
        version = 1;
    }

    if version == 1 {
        conn.execute_batch(MIGRATION_V1_TO_V2)?;
        version = 2;
    }

    if version == 2 {
        Ok(())
    } else {
        Err(rusqlite::Error::InvalidQuery)
    }
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

pub(crate) fn like(term: &str) -> String {
    format!("%{}%", term)
}

/// Interpret a filter value as a 0/1 flag the way the wire sends it.
pub(crate) fn flag(value: &FilterValue) -> i64 {
    match value {
        FilterValue::Bool(b) => i64::from(*b),
        FilterValue::Int(n) => i64::from(*n != 0),
        FilterValue::Text(s) => i64::from(s == "1" || s == "true"),
    }
}
