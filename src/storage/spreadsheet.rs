//! XLSX export of a dataset, plus the matching import used to check exports.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::errors::{NexusError, Result};

use super::{
    csv_backend::{at_line, check_headers},
    Cell, DatasetKind, Record,
};

pub const SHEET_NAME: &str = "Nexus_Data";

pub fn export_file_name(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Receipts => "Receipts_Nexus.xlsx",
        DatasetKind::Expenses => "Expenses_Nexus.xlsx",
    }
}

/// Renders the rows as a single-sheet workbook with the storage columns.
pub fn export_table<R: Record>(rows: &[R]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in R::KIND.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let row_idx = index as u32 + 1;
        for (col, cell) in row.cells().into_iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row_idx, col as u16, &text)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(row_idx, col as u16, value as f64)?;
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(dataset = %R::KIND, rows = rows.len(), bytes = bytes.len(), "exported workbook");
    Ok(bytes)
}

/// Reads a workbook produced by [`export_table`] back into typed rows.
pub fn import_table<R: Record>(bytes: &[u8]) -> Result<Vec<R>> {
    let kind = R::KIND;
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook.worksheet_range(SHEET_NAME)?;

    let mut lines = range.rows();
    let Some(header_row) = lines.next() else {
        return Ok(Vec::new());
    };
    let headers = csv::StringRecord::from(
        header_row
            .iter()
            .map(cell_text)
            .collect::<Result<Vec<String>>>()?,
    );
    check_headers(kind, headers.iter())?;

    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        let values = line.iter().map(cell_text).collect::<Result<Vec<String>>>()?;
        let record = csv::StringRecord::from(values);
        let row = record
            .deserialize::<R>(Some(&headers))
            .map_err(|err| NexusError::InvalidRecord {
                dataset: kind.label(),
                message: format!("sheet row {}: {}", index + 2, err),
            })?;
        row.validate().map_err(|err| at_line(err, index + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

fn cell_text(cell: &Data) -> Result<String> {
    match cell {
        Data::String(text) => Ok(text.clone()),
        Data::Int(value) => Ok(value.to_string()),
        Data::Float(value) if value.fract() == 0.0 => Ok(format!("{}", *value as i64)),
        Data::Float(value) => Ok(value.to_string()),
        Data::Bool(value) => Ok(value.to_string()),
        Data::Empty => Ok(String::new()),
        other => Err(NexusError::Spreadsheet(format!(
            "unsupported cell value {other:?}"
        ))),
    }
}
