//! Output formatting for product records (table, JSON, CSV).

use crate::config::OutputFormat;
use crate::storefront::ProductRecord;

/// Formats records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the full record list.
    pub fn format_records(&self, records: &[ProductRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                OutputFormat::Table => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    fn json_records(&self, records: &[ProductRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    fn table_records(&self, records: &[ProductRecord]) -> String {
        let rows: Vec<[String; 5]> = records
            .iter()
            .map(|r| {
                [
                    r.code.clone(),
                    format!("{:.2}", r.price),
                    r.name.clone(),
                    r.url.clone(),
                    r.image_url.clone().unwrap_or_default(),
                ]
            })
            .collect();

        let header = ["Code", "Price", "Name", "URL", "Image URL"];
        let mut widths = header.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 4);
        lines.push(table_line(&header.map(String::from), &widths));
        lines.push(table_line(&widths.map(|w| "-".repeat(w)), &widths));
        for row in &rows {
            lines.push(table_line(row, &widths));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", records.len()));

        lines.join("\n")
    }

    fn csv_header(&self) -> String {
        "code,name,price,url,image_url".to_string()
    }

    fn csv_records(&self, records: &[ProductRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for record in records {
            lines.push(format!(
                "{},{},{},{},{}",
                Self::csv_escape(&record.code),
                Self::csv_escape(&record.name),
                record.price,
                Self::csv_escape(&record.url),
                record.image_url.as_deref().map(Self::csv_escape).unwrap_or_default()
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Joins cells into one row; price is right-aligned, trailing padding dropped.
fn table_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if i == 1 {
                format!("{:>w$}", cell)
            } else {
                format!("{:<w$}", cell)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}
