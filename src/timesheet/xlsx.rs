// src/timesheet/xlsx.rs

use crate::errors::AppResult;
use crate::models::entry::Entry;
use crate::timesheet::excel_date::{
    DATE_NUM_FORMAT, from_excel_serial, parse_date_text, to_excel_serial,
};
use crate::timesheet::{COLUMNS, ColumnMap, SheetRows, UnparsedRow};
use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Legge tutte le righe del primo foglio.
pub(crate) fn read_xlsx(path: &Path) -> AppResult<SheetRows> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let range = match workbook.worksheet_range_at(0) {
        Some(r) => r?,
        None => return Ok(SheetRows::default()),
    };

    let mut data_rows = range.rows();

    let columns = match data_rows.next() {
        Some(header) => {
            let names: Vec<String> = header.iter().map(cell_text).collect();
            ColumnMap::from_headers(&names)
        }
        None => return Ok(SheetRows::default()),
    };

    let mut rows = SheetRows::default();

    for (idx, row) in data_rows.enumerate() {
        let date_cell = row.get(columns.date).unwrap_or(&Data::Empty);
        let date = cell_date(date_cell);

        let date_text = match date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => cell_text(date_cell),
        };
        let status = row.get(columns.status).map(cell_text).unwrap_or_default();
        let remarks = row.get(columns.remarks).map(cell_text).unwrap_or_default();

        rows.push_row(date, [date_text, status, remarks], idx + 2);
    }

    Ok(rows)
}

fn cell_text(c: &Data) -> String {
    match c {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_date(c: &Data) -> Option<chrono::NaiveDate> {
    match c {
        Data::DateTime(dt) => from_excel_serial(dt.as_f64()),
        Data::Float(f) => from_excel_serial(*f),
        Data::Int(i) => from_excel_serial(*i as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_date_text(s),
        _ => None,
    }
}

/// Scrive l'intero timesheet: header con stile, date come seriali Excel,
/// righe a bande alternate e auto-larghezza colonne.
pub(crate) fn write_xlsx(rows: &SheetRows, path: &Path) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Timesheet")?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *header, &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = COLUMNS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    // a formatted date is always 10 chars wide
    col_widths[0] = col_widths[0].max(10);

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, entry) in rows.entries.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        write_row(worksheet, row, entry, band)?;

        col_widths[1] = col_widths[1].max(UnicodeWidthStr::width(entry.status.code()));
        col_widths[2] = col_widths[2].max(UnicodeWidthStr::width(entry.remarks.as_str()));
    }

    // unreadable rows go back as plain text after the others
    let offset = rows.entries.len();
    for (i, raw) in rows.unparsed.iter().enumerate() {
        let row_index = offset + i;
        let band = if row_index % 2 == 0 { band1 } else { band2 };
        write_raw_row(worksheet, (row_index + 1) as u32, raw, band)?;

        for (c, text) in raw.cells.iter().enumerate() {
            col_widths[c] = col_widths[c].max(UnicodeWidthStr::width(text.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_row(worksheet: &mut Worksheet, row: u32, entry: &Entry, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let date_fmt = base.clone().set_num_format(DATE_NUM_FORMAT);

    worksheet.write_with_format(row, 0, to_excel_serial(entry.date), &date_fmt)?;
    worksheet.write_with_format(row, 1, entry.status.code(), &base)?;
    worksheet.write_with_format(row, 2, entry.remarks.as_str(), &base)?;

    Ok(())
}

fn write_raw_row(worksheet: &mut Worksheet, row: u32, raw: &UnparsedRow, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, text) in raw.cells.iter().enumerate() {
        worksheet.write_with_format(row, col as u16, text.as_str(), &base)?;
    }
    Ok(())
}
