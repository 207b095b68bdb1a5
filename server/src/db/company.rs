use rusqlite::{params, Connection, Result, Row};

use tally_core::{Company, CompanyDraft, FilterSet, FilterValue};

use super::{flag, like, new_id, now_millis};

const COLUMNS: &str =
    "id, name, legal_name, tax_id, email, website, is_active, created_at, updated_at, deleted_at";

fn from_row(row: &Row<'_>) -> Result<Company> {
    Ok(Company {
        id: row.get(0)?,
        name: row.get(1)?,
        legal_name: row.get(2)?,
        tax_id: row.get(3)?,
        email: row.get(4)?,
        website: row.get(5)?,
        is_active: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
        deleted_at: row.get(9)?,
    })
}

pub fn list_companies(
    conn: &Connection,
    filters: &FilterSet,
    page: u32,
    per_page: u32,
) -> Result<(Vec<Company>, u64)> {
    let mut clauses = String::from(" WHERE deleted_at IS NULL");
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(FilterValue::Text(term)) = filters.get("search") {
        clauses.push_str(" AND (name LIKE ? OR legal_name LIKE ? OR tax_id LIKE ?)");
        args.push(Box::new(like(term)));
        args.push(Box::new(like(term)));
        args.push(Box::new(like(term)));
    }
    if let Some(value) = filters.get("is_active") {
        clauses.push_str(" AND is_active = ?");
        args.push(Box::new(flag(value)));
    }

    let args_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|b| b.as_ref()).collect();

    let total: u64 = conn
        .prepare(&format!("SELECT COUNT(*) FROM companies{}", clauses))?
        .query_row(args_refs.as_slice(), |row| row.get(0))?;

    let sql = format!(
        "SELECT {} FROM companies{} ORDER BY created_at DESC LIMIT {} OFFSET {}",
        COLUMNS,
        clauses,
        per_page,
        u64::from(page.saturating_sub(1)) * u64::from(per_page),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args_refs.as_slice(), from_row)?;
    let companies = rows.collect::<Result<Vec<_>>>()?;

    Ok((companies, total))
}

pub fn insert_company(conn: &Connection, draft: &CompanyDraft) -> Result<Company> {
    let id = new_id();
    let now = now_millis();

    conn.execute(
        "INSERT INTO companies (id, name, legal_name, tax_id, email, website, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            id,
            draft.name,
            draft.legal_name,
            draft.tax_id,
            draft.email,
            draft.website,
            draft.is_active,
            now,
            now
        ],
    )?;

    Ok(Company {
        id,
        name: draft.name.clone(),
        legal_name: draft.legal_name.clone(),
        tax_id: draft.tax_id.clone(),
        email: draft.email.clone(),
        website: draft.website.clone(),
        is_active: draft.is_active,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

pub fn update_company(
    conn: &Connection,
    id: &str,
    draft: &CompanyDraft,
) -> Result<Option<Company>> {
    let now = now_millis();

    let changed = conn.execute(
        "UPDATE companies SET name = ?1, legal_name = ?2, tax_id = ?3, email = ?4, website = ?5,
         is_active = ?6, updated_at = ?7 WHERE id = ?8 AND deleted_at IS NULL",
        params![
            draft.name,
            draft.legal_name,
            draft.tax_id,
            draft.email,
            draft.website,
            draft.is_active,
            now,
            id
        ],
    )?;

    if changed == 0 {
        return Ok(None);
    }

    let company = conn
        .prepare(&format!("SELECT {} FROM companies WHERE id = ?1", COLUMNS))?
        .query_row(params![id], from_row)?;
    Ok(Some(company))
}

pub fn soft_delete_company(conn: &Connection, id: &str) -> Result<bool> {
    let now = now_millis();
    let changed = conn.execute(
        "UPDATE companies SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        params![now, id],
    )?;
    Ok(changed > 0)
}
