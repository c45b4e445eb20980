//! Role command groups for the workshop CLI

pub mod customer;
pub mod manager;
pub mod rep;
pub mod tech;

use anyhow::Result;
use serde::Serialize;
use workshop_database::{Row, Technician};

/// Where results go: plain text tables or JSON on stdout.
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a listing, as JSON or through the text renderer
    pub fn list<T: Serialize>(&self, items: &[T], empty: &str, render: impl FnOnce(&[T])) -> Result<()> {
        if self.json {
            return self.print_json(items);
        }
        if items.is_empty() {
            println!("{}", empty);
        } else {
            render(items);
        }
        Ok(())
    }

    /// Report a completed write
    pub fn done(&self, message: &str) -> Result<()> {
        if self.json {
            return self.print_json(&serde_json::json!({ "ok": true, "message": message }));
        }
        println!("{}", message);
        Ok(())
    }
}

/// Render generic rows as a left-aligned table
pub fn print_rows(rows: &[Row]) {
    let Some(first) = rows.first() else {
        println!("(no rows)");
        return;
    };

    let columns: Vec<&str> = first.columns().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|(_, value)| value.to_string()).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(String::len)
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

    for row in cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", line.join("  "));
    }

    println!("\n{} row(s)", rows.len());
}

pub(crate) fn print_technicians(techs: &[Technician]) {
    println!(
        "{:<8} {:<25} {:<18} {:<20} {:>4}",
        "ID", "NAME", "TRAINED FOR", "SPECIALIZATION", "YOE"
    );
    println!("{}", "-".repeat(79));
    for t in techs {
        println!(
            "{:<8} {:<25} {:<18} {:<20} {:>4}",
            t.technician_id,
            format!("{} {}", t.first_name, t.last_name),
            or_dash(t.trained_for.as_deref()),
            or_dash(t.specialization.as_deref()),
            t.years_of_experience
        );
    }
}

pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
