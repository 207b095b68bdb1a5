use rusqlite::{params, Connection, Result, Row};

use tally_core::{FilterSet, FilterValue, Purchase, PurchaseDraft, PurchaseStatus};

use super::{like, new_id, now_millis};

const COLUMNS: &str =
    "id, supplier_id, reference, total_cents, status, purchased_on, created_at, updated_at, deleted_at";

fn from_row(row: &Row<'_>) -> Result<Purchase> {
    let status: String = row.get(4)?;
    let status = status.parse::<PurchaseStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })?;

    Ok(Purchase {
        id: row.get(0)?,
        supplier_id: row.get(1)?,
        reference: row.get(2)?,
        total_cents: row.get(3)?,
        status,
        purchased_on: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
        deleted_at: row.get(8)?,
    })
}

pub fn list_purchases(
    conn: &Connection,
    filters: &FilterSet,
    page: u32,
    per_page: u32,
) -> Result<(Vec<Purchase>, u64)> {
    let mut clauses = String::from(" WHERE deleted_at IS NULL");
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(FilterValue::Text(term)) = filters.get("search") {
        clauses.push_str(" AND reference LIKE ?");
        args.push(Box::new(like(term)));
    }
    if let Some(FilterValue::Text(supplier_id)) = filters.get("supplier_id") {
        clauses.push_str(" AND supplier_id = ?");
        args.push(Box::new(supplier_id.clone()));
    }
    if let Some(FilterValue::Text(status)) = filters.get("status") {
        clauses.push_str(" AND status = ?");
        args.push(Box::new(status.clone()));
    }
    if let Some(FilterValue::Text(date)) = filters.get("from") {
        clauses.push_str(" AND purchased_on >= ?");
        args.push(Box::new(date.clone()));
    }
    if let Some(FilterValue::Text(date)) = filters.get("to") {
        clauses.push_str(" AND purchased_on <= ?");
        args.push(Box::new(date.clone()));
    }

    let args_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|b| b.as_ref()).collect();

    let total: u64 = conn
        .prepare(&format!("SELECT COUNT(*) FROM purchases{}", clauses))?
        .query_row(args_refs.as_slice(), |row| row.get(0))?;

    let sql = format!(
        "SELECT {} FROM purchases{} ORDER BY created_at DESC LIMIT {} OFFSET {}",
        COLUMNS,
        clauses,
        per_page,
        u64::from(page.saturating_sub(1)) * u64::from(per_page),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args_refs.as_slice(), from_row)?;
    let purchases = rows.collect::<Result<Vec<_>>>()?;

    Ok((purchases, total))
}

pub fn insert_purchase(conn: &Connection, draft: &PurchaseDraft) -> Result<Purchase> {
    let id = new_id();
    let now = now_millis();

    conn.execute(
        "INSERT INTO purchases (id, supplier_id, reference, total_cents, status, purchased_on, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            draft.supplier_id,
            draft.reference,
            draft.total_cents,
            draft.status.as_str(),
            draft.purchased_on,
            now,
            now
        ],
    )?;

    Ok(Purchase {
        id,
        supplier_id: draft.supplier_id.clone(),
        reference: draft.reference.clone(),
        total_cents: draft.total_cents,
        status: draft.status,
        purchased_on: draft.purchased_on.clone(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

pub fn update_purchase(
    conn: &Connection,
    id: &str,
    draft: &PurchaseDraft,
) -> Result<Option<Purchase>> {
    let now = now_millis();

    let changed = conn.execute(
        "UPDATE purchases SET supplier_id = ?1, reference = ?2, total_cents = ?3, status = ?4,
         purchased_on = ?5, updated_at = ?6 WHERE id = ?7 AND deleted_at IS NULL",
        params![
            draft.supplier_id,
            draft.reference,
            draft.total_cents,
            draft.status.as_str(),
            draft.purchased_on,
            now,
            id
        ],
    )?;

    if changed == 0 {
        return Ok(None);
    }

    let purchase = conn
        .prepare(&format!("SELECT {} FROM purchases WHERE id = ?1", COLUMNS))?
        .query_row(params![id], from_row)?;
    Ok(Some(purchase))
}

pub fn soft_delete_purchase(conn: &Connection, id: &str) -> Result<bool> {
    let now = now_millis();
    let changed = conn.execute(
        "UPDATE purchases SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        params![now, id],
    )?;
    Ok(changed > 0)
}
