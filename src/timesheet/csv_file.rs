use crate::errors::AppResult;
use crate::timesheet::excel_date::parse_date_text;
use crate::timesheet::{COLUMNS, ColumnMap, SheetRows};
use csv::{ReaderBuilder, Writer};
use std::path::Path;

/// Legge il timesheet da CSV (header obbligatorio).
pub(crate) fn read_csv(path: &Path) -> AppResult<SheetRows> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnMap::from_headers(&headers);

    let mut rows = SheetRows::default();

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let cell = |i: usize| record.get(i).unwrap_or("").trim().to_string();

        let cells = [cell(columns.date), cell(columns.status), cell(columns.remarks)];
        let date = parse_date_text(&cells[0]);
        rows.push_row(date, cells, idx + 2);
    }

    Ok(rows)
}

/// Scrive il timesheet in CSV; le righe non lette restano in coda.
pub(crate) fn write_csv(rows: &SheetRows, path: &Path) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(COLUMNS)?;

    for e in &rows.entries {
        wtr.write_record(e.to_row())?;
    }
    for raw in &rows.unparsed {
        wtr.write_record(&raw.cells)?;
    }

    wtr.flush()?;
    Ok(())
}
