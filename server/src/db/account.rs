use rusqlite::{params, Connection, Result, Row};

use tally_core::{Account, AccountDraft, AccountKind, FilterSet, FilterValue};

use super::{flag, like, new_id, now_millis};

const COLUMNS: &str = "id, code, name, kind, is_active, created_at, updated_at, deleted_at";

fn from_row(row: &Row<'_>) -> Result<Account> {
    let kind: String = row.get(3)?;
    let kind = kind.parse::<AccountKind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })?;

    Ok(Account {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        kind,
        is_active: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
        deleted_at: row.get(7)?,
    })
}

/// List one page of accounts plus the total matching count.
pub fn list_accounts(
    conn: &Connection,
    filters: &FilterSet,
    page: u32,
    per_page: u32,
) -> Result<(Vec<Account>, u64)> {
    let mut clauses = String::from(" WHERE deleted_at IS NULL");
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(FilterValue::Text(term)) = filters.get("search") {
        clauses.push_str(" AND (code LIKE ? OR name LIKE ?)");
        args.push(Box::new(like(term)));
        args.push(Box::new(like(term)));
    }
    if let Some(FilterValue::Text(kind)) = filters.get("kind") {
        clauses.push_str(" AND kind = ?");
        args.push(Box::new(kind.clone()));
    }
    if let Some(value) = filters.get("is_active") {
        clauses.push_str(" AND is_active = ?");
        args.push(Box::new(flag(value)));
    }

    let args_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|b| b.as_ref()).collect();

    let total: u64 = conn
        .prepare(&format!("SELECT COUNT(*) FROM accounts{}", clauses))?
        .query_row(args_refs.as_slice(), |row| row.get(0))?;

    let sql = format!(
        "SELECT {} FROM accounts{} ORDER BY created_at DESC LIMIT {} OFFSET {}",
        COLUMNS,
        clauses,
        per_page,
        u64::from(page.saturating_sub(1)) * u64::from(per_page),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args_refs.as_slice(), from_row)?;
    let accounts = rows.collect::<Result<Vec<_>>>()?;

    Ok((accounts, total))
}

pub fn insert_account(conn: &Connection, draft: &AccountDraft) -> Result<Account> {
    let id = new_id();
    let now = now_millis();

    conn.execute(
        "INSERT INTO accounts (id, code, name, kind, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            draft.code,
            draft.name,
            draft.kind.as_str(),
            draft.is_active,
            now,
            now
        ],
    )?;

    Ok(Account {
        id,
        code: draft.code.clone(),
        name: draft.name.clone(),
        kind: draft.kind,
        is_active: draft.is_active,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

pub fn update_account(
    conn: &Connection,
    id: &str,
    draft: &AccountDraft,
) -> Result<Option<Account>> {
    let now = now_millis();

    let changed = conn.execute(
        "UPDATE accounts SET code = ?1, name = ?2, kind = ?3, is_active = ?4, updated_at = ?5
         WHERE id = ?6 AND deleted_at IS NULL",
        params![
            draft.code,
            draft.name,
            draft.kind.as_str(),
            draft.is_active,
            now,
            id
        ],
    )?;

    if changed == 0 {
        return Ok(None);
    }

    let account = conn
        .prepare(&format!("SELECT {} FROM accounts WHERE id = ?1", COLUMNS))?
        .query_row(params![id], from_row)?;
    Ok(Some(account))
}

pub fn soft_delete_account(conn: &Connection, id: &str) -> Result<bool> {
    let now = now_millis();
    let changed = conn.execute(
        "UPDATE accounts SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        params![now, id],
    )?;
    Ok(changed > 0)
}
