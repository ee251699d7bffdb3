use tabled::{builder::Builder, settings::Style};

use super::document::{ReportDocument, SectionBody};

/// Render a report for the terminal: one rounded table per section.
pub fn render_preview(doc: &ReportDocument) -> String {
    if doc.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&doc.title);
    out.push('\n');
    out.push_str(&"=".repeat(doc.title.chars().count()));
    out.push_str("\n\n");

    for section in &doc.sections {
        out.push_str(&section.title);
        out.push('\n');

        if section.row_count() == 0 && matches!(section.body, SectionBody::KeyValue { .. }) {
            out.push_str("  (no data)\n\n");
            continue;
        }

        let mut builder = Builder::default();
        match &section.body {
            SectionBody::KeyValue { rows } => {
                for (label, value) in rows {
                    builder.push_record([label.clone(), value.to_string()]);
                }
            }
            SectionBody::Table { headers, rows } => {
                builder.push_record(headers.iter().cloned());
                for row in rows {
                    builder.push_record(row.iter().map(ToString::to_string));
                }
            }
        }

        let table = builder.build().with(Style::rounded()).to_string();
        out.push_str(&table);
        if section.row_count() == 0 {
            out.push_str("\n  (no rows)");
        }
        out.push_str("\n\n");
    }

    out
}
