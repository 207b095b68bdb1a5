use std::io::Write;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use tally_core::{
    Account, Company, CollectionState, Establishment, Product, Purchase, Resource, Supplier,
};

use crate::args::OutputFormat;

/// How one entity renders as a table row.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

pub fn fmt_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

impl TableRow for Account {
    const HEADERS: &'static [&'static str] = &["ID", "CODE", "NAME", "KIND", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.code.clone(),
            self.name.clone(),
            self.kind.to_string(),
            yes_no(self.is_active),
        ]
    }
}

impl TableRow for Company {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "TAX ID", "EMAIL", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.tax_id.clone(),
            self.email.clone().unwrap_or_default(),
            yes_no(self.is_active),
        ]
    }
}

impl TableRow for Establishment {
    const HEADERS: &'static [&'static str] = &["ID", "COMPANY", "NAME", "PHONE", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.company_id.clone(),
            self.name.clone(),
            self.phone.clone().unwrap_or_default(),
            yes_no(self.is_active),
        ]
    }
}

impl TableRow for Product {
    const HEADERS: &'static [&'static str] = &["ID", "SKU", "NAME", "UNIT", "PRICE", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.sku.clone(),
            self.name.clone(),
            self.unit.clone().unwrap_or_default(),
            fmt_cents(self.unit_price_cents),
            yes_no(self.is_active),
        ]
    }
}

impl TableRow for Supplier {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "TAX ID", "PHONE", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.tax_id.clone().unwrap_or_default(),
            self.phone.clone().unwrap_or_default(),
            yes_no(self.is_active),
        ]
    }
}

impl TableRow for Purchase {
    const HEADERS: &'static [&'static str] =
        &["ID", "SUPPLIER", "REFERENCE", "TOTAL", "STATUS", "DATE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.supplier_id.clone(),
            self.reference.clone(),
            fmt_cents(self.total_cents),
            self.status.to_string(),
            self.purchased_on.clone().unwrap_or_default(),
        ]
    }
}

/// Print one page of a collection in the requested format. Pretty output
/// ends with a pagination footer.
pub fn print_collection<E>(
    state: &CollectionState<E>,
    output: &OutputFormat,
) -> anyhow::Result<()>
where
    E: Resource + TableRow + Serialize,
{
    match output {
        OutputFormat::Json => {
            let rows = state.entities.to_vec();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            for entity in state.entities.iter() {
                println!("{}", entity.cells().join("\t"));
            }
        }
        OutputFormat::Pretty => print_table(state)?,
    }
    Ok(())
}

fn print_table<E>(state: &CollectionState<E>) -> anyhow::Result<()>
where
    E: Resource + TableRow,
{
    let rows: Vec<Vec<String>> = state.entities.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = E::HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    for (i, header) in E::HEADERS.iter().enumerate() {
        write!(stdout, "{:<width$}  ", header, width = widths[i])?;
    }
    writeln!(stdout)?;
    stdout.reset()?;

    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            write!(stdout, "{:<width$}  ", cell, width = widths[i])?;
        }
        writeln!(stdout)?;
    }

    if rows.is_empty() {
        writeln!(stdout, "(no records)")?;
    }

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(
        stdout,
        "page {} of {} ({} records)",
        state.pagination.current_page, state.pagination.total_pages, state.pagination.total_records
    )?;
    stdout.reset()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_format_covers_negatives() {
        assert_eq!(fmt_cents(1250), "12.50");
        assert_eq!(fmt_cents(5), "0.05");
        assert_eq!(fmt_cents(-199), "-1.99");
        assert_eq!(fmt_cents(-50), "-0.50");
    }
}
