use rusqlite::{params, Connection, Result, Row};

use tally_core::{FilterSet, FilterValue, Product, ProductDraft};

use super::{flag, like, new_id, now_millis};

const COLUMNS: &str =
    "id, sku, name, unit, unit_price_cents, is_active, created_at, updated_at, deleted_at";

fn from_row(row: &Row<'_>) -> Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        sku: row.get(1)?,
        name: row.get(2)?,
        unit: row.get(3)?,
        unit_price_cents: row.get(4)?,
        is_active: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
        deleted_at: row.get(8)?,
    })
}

pub fn list_products(
    conn: &Connection,
    filters: &FilterSet,
    page: u32,
    per_page: u32,
) -> Result<(Vec<Product>, u64)> {
    let mut clauses = String::from(" WHERE deleted_at IS NULL");
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(FilterValue::Text(term)) = filters.get("search") {
        clauses.push_str(" AND (sku LIKE ? OR name LIKE ?)");
        args.push(Box::new(like(term)));
        args.push(Box::new(like(term)));
    }
    if let Some(value) = filters.get("is_active") {
        clauses.push_str(" AND is_active = ?");
        args.push(Box::new(flag(value)));
    }

    let args_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|b| b.as_ref()).collect();

    let total: u64 = conn
        .prepare(&format!("SELECT COUNT(*) FROM products{}", clauses))?
        .query_row(args_refs.as_slice(), |row| row.get(0))?;

    let sql = format!(
        "SELECT {} FROM products{} ORDER BY created_at DESC LIMIT {} OFFSET {}",
        COLUMNS,
        clauses,
        per_page,
        u64::from(page.saturating_sub(1)) * u64::from(per_page),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args_refs.as_slice(), from_row)?;
    let products = rows.collect::<Result<Vec<_>>>()?;

    Ok((products, total))
}

pub fn insert_product(conn: &Connection, draft: &ProductDraft) -> Result<Product> {
    let id = new_id();
    let now = now_millis();

    conn.execute(
        "INSERT INTO products (id, sku, name, unit, unit_price_cents, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            draft.sku,
            draft.name,
            draft.unit,
            draft.unit_price_cents,
            draft.is_active,
            now,
            now
        ],
    )?;

    Ok(Product {
        id,
        sku: draft.sku.clone(),
        name: draft.name.clone(),
        unit: draft.unit.clone(),
        unit_price_cents: draft.unit_price_cents,
        is_active: draft.is_active,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

pub fn update_product(
    conn: &Connection,
    id: &str,
    draft: &ProductDraft,
) -> Result<Option<Product>> {
    let now = now_millis();

    let changed = conn.execute(
        "UPDATE products SET sku = ?1, name = ?2, unit = ?3, unit_price_cents = ?4,
         is_active = ?5, updated_at = ?6 WHERE id = ?7 AND deleted_at IS NULL",
        params![
            draft.sku,
            draft.name,
            draft.unit,
            draft.unit_price_cents,
            draft.is_active,
            now,
            id
        ],
    )?;

    if changed == 0 {
        return Ok(None);
    }

    let product = conn
        .prepare(&format!("SELECT {} FROM products WHERE id = ?1", COLUMNS))?
        .query_row(params![id], from_row)?;
    Ok(Some(product))
}

pub fn soft_delete_product(conn: &Connection, id: &str) -> Result<bool> {
    let now = now_millis();
    let changed = conn.execute(
        "UPDATE products SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        params![now, id],
    )?;
    Ok(changed > 0)
}
