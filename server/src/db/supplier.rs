use rusqlite::{params, Connection, Result, Row};

use tally_core::{FilterSet, FilterValue, Supplier, SupplierDraft};

use super::{flag, like, new_id, now_millis};

const COLUMNS: &str =
    "id, name, tax_id, email, phone, is_active, created_at, updated_at, deleted_at";

fn from_row(row: &Row<'_>) -> Result<Supplier> {
    Ok(Supplier {
        id: row.get(0)?,
        name: row.get(1)?,
        tax_id: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        is_active: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
        deleted_at: row.get(8)?,
    })
}

pub fn list_suppliers(
    conn: &Connection,
    filters: &FilterSet,
    page: u32,
    per_page: u32,
) -> Result<(Vec<Supplier>, u64)> {
    let mut clauses = String::from(" WHERE deleted_at IS NULL");
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(FilterValue::Text(term)) = filters.get("search") {
        clauses.push_str(" AND (name LIKE ? OR tax_id LIKE ?)");
        args.push(Box::new(like(term)));
        args.push(Box::new(like(term)));
    }
    if let Some(value) = filters.get("is_active") {
        clauses.push_str(" AND is_active = ?");
        args.push(Box::new(flag(value)));
    }

    let args_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|b| b.as_ref()).collect();

    let total: u64 = conn
        .prepare(&format!("SELECT COUNT(*) FROM suppliers{}", clauses))?
        .query_row(args_refs.as_slice(), |row| row.get(0))?;

    let sql = format!(
        "SELECT {} FROM suppliers{} ORDER BY created_at DESC LIMIT {} OFFSET {}",
        COLUMNS,
        clauses,
        per_page,
        u64::from(page.saturating_sub(1)) * u64::from(per_page),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args_refs.as_slice(), from_row)?;
    let suppliers = rows.collect::<Result<Vec<_>>>()?;

    Ok((suppliers, total))
}

pub fn insert_supplier(conn: &Connection, draft: &SupplierDraft) -> Result<Supplier> {
    let id = new_id();
    let now = now_millis();

    conn.execute(
        "INSERT INTO suppliers (id, name, tax_id, email, phone, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            draft.name,
            draft.tax_id,
            draft.email,
            draft.phone,
            draft.is_active,
            now,
            now
        ],
    )?;

    Ok(Supplier {
        id,
        name: draft.name.clone(),
        tax_id: draft.tax_id.clone(),
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        is_active: draft.is_active,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

pub fn update_supplier(
    conn: &Connection,
    id: &str,
    draft: &SupplierDraft,
) -> Result<Option<Supplier>> {
    let now = now_millis();

    let changed = conn.execute(
        "UPDATE suppliers SET name = ?1, tax_id = ?2, email = ?3, phone = ?4,
         is_active = ?5, updated_at = ?6 WHERE id = ?7 AND deleted_at IS NULL",
        params![
            draft.name,
            draft.tax_id,
            draft.email,
            draft.phone,
            draft.is_active,
            now,
            id
        ],
    )?;

    if changed == 0 {
        return Ok(None);
    }

    let supplier = conn
        .prepare(&format!("SELECT {} FROM suppliers WHERE id = ?1", COLUMNS))?
        .query_row(params![id], from_row)?;
    Ok(Some(supplier))
}

pub fn soft_delete_supplier(conn: &Connection, id: &str) -> Result<bool> {
    let now = now_millis();
    let changed = conn.execute(
        "UPDATE suppliers SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        params![now, id],
    )?;
    Ok(changed > 0)
}
