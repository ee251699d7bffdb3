//! CSV rendering of a [`ReportDocument`].
//!
//! Layout: the document title, a blank line, then each section as its
//! title line followed by either `label,value` lines or a header line and
//! data lines, with a blank line after every section. Records have
//! different widths, so the writer runs in flexible mode.

use chrono::NaiveDateTime;

use super::document::{ReportDocument, SectionBody};
use crate::error::Result;

/// Render `doc` without any timestamp. Identical documents give identical
/// bytes. An empty document renders as an empty string.
pub fn to_csv(doc: &ReportDocument) -> Result<String> {
    render(doc, None)
}

/// Render `doc` with a `Generated: <timestamp>` line under the title.
pub fn to_csv_with_timestamp(doc: &ReportDocument, generated_at: NaiveDateTime) -> Result<String> {
    render(doc, Some(generated_at))
}

fn writer(out: &mut Vec<u8>) -> ::csv::Writer<&mut Vec<u8>> {
    ::csv::WriterBuilder::new()
        .flexible(true)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

fn render(doc: &ReportDocument, generated_at: Option<NaiveDateTime>) -> Result<String> {
    if doc.is_empty() {
        return Ok(String::new());
    }

    let mut out = Vec::new();

    let mut preamble = Vec::new();
    if !doc.title.is_empty() {
        preamble.push(doc.title.clone());
    }
    if let Some(ts) = generated_at {
        preamble.push(format!("Generated: {}", ts.format("%Y-%m-%d %H:%M:%S")));
    }
    if !preamble.is_empty() {
        let mut wtr = writer(&mut out);
        for line in preamble {
            wtr.write_record([line])?;
        }
        wtr.flush()?;
        drop(wtr);
        out.push(b'\n');
    }

    for section in &doc.sections {
        let mut wtr = writer(&mut out);
        wtr.write_record([section.title.as_str()])?;
        match &section.body {
            SectionBody::KeyValue { rows } => {
                for (label, value) in rows {
                    wtr.write_record([label.clone(), value.to_string()])?;
                }
            }
            SectionBody::Table { headers, rows } => {
                wtr.write_record(headers)?;
                for row in rows {
                    wtr.write_record(row.iter().map(ToString::to_string))?;
                }
            }
        }
        wtr.flush()?;
        drop(wtr);
        out.push(b'\n');
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}
