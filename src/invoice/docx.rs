// src/invoice/docx.rs

//! Fixed-layout invoice written as a WordprocessingML (.docx) package.
//!
//! The page is a single-column frame table; each frame row holds one block
//! (title, name/date line, bill-to, table header, items, total, amount in
//! words). Two-column blocks are nested tables inside the frame cell.

use crate::errors::AppResult;
use crate::models::invoice::InvoiceData;
use std::fs;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::FileOptions;

const FRAME_W: u32 = 9360; // 6.5in in twips
const NAME_W: u32 = 5760; // 4.0in
const DATE_W: u32 = 3600; // 2.5in
const DESC_W: u32 = 7200; // 5.0in
const AMOUNT_W: u32 = 2160; // 1.5in

const HEADER_FILL: &str = "ff99cc";
const TOTAL_FILL: &str = "ffcc99";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// One side of a cell border.
#[derive(Debug, Clone, Copy)]
enum Edge {
    Nil,
    Single,
}

/// Borders set explicitly on a cell; `None` leaves the side to the table.
#[derive(Debug, Clone, Copy, Default)]
struct Borders {
    top: Option<Edge>,
    left: Option<Edge>,
    bottom: Option<Edge>,
    right: Option<Edge>,
}

impl Borders {
    const NONE: Borders = Borders {
        top: None,
        left: None,
        bottom: None,
        right: None,
    };

    const ALL_NIL: Borders = Borders {
        top: Some(Edge::Nil),
        left: Some(Edge::Nil),
        bottom: Some(Edge::Nil),
        right: Some(Edge::Nil),
    };

    /// Frame sides (left/right single) with the given top and bottom.
    const fn frame(top: Option<Edge>, bottom: Option<Edge>) -> Borders {
        Borders {
            top,
            left: Some(Edge::Single),
            bottom,
            right: Some(Edge::Single),
        }
    }

    fn to_xml(self) -> String {
        let sides = [
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("right", self.right),
        ];
        if sides.iter().all(|(_, e)| e.is_none()) {
            return String::new();
        }

        let mut out = String::from("<w:tcBorders>");
        for (name, edge) in sides {
            match edge {
                Some(Edge::Nil) => out.push_str(&format!(r#"<w:{name} w:val="nil"/>"#)),
                Some(Edge::Single) => out.push_str(&format!(
                    r#"<w:{name} w:val="single" w:sz="6" w:space="0" w:color="000000"/>"#
                )),
                None => {}
            }
        }
        out.push_str("</w:tcBorders>");
        out
    }
}

#[derive(Debug, Clone, Default)]
struct Run {
    text: String,
    bold: bool,
    font: Option<&'static str>,
    size_pt: Option<u32>,
    break_after: bool,
}

impl Run {
    fn plain(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            ..Run::default()
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            bold: true,
            ..Run::default()
        }
    }

    fn with_break(mut self) -> Self {
        self.break_after = true;
        self
    }

    fn to_xml(&self) -> String {
        let mut props = String::new();
        if let Some(font) = self.font {
            props.push_str(&format!(
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
            ));
        }
        if self.bold {
            props.push_str("<w:b/>");
        }
        if let Some(pt) = self.size_pt {
            let half = pt * 2;
            props.push_str(&format!(r#"<w:sz w:val="{half}"/><w:szCs w:val="{half}"/>"#));
        }

        let mut out = String::from("<w:r>");
        if !props.is_empty() {
            out.push_str(&format!("<w:rPr>{props}</w:rPr>"));
        }
        out.push_str(&format!(
            r#"<w:t xml:space="preserve">{}</w:t>"#,
            escape(&self.text)
        ));
        if self.break_after {
            out.push_str("<w:br/>");
        }
        out.push_str("</w:r>");
        out
    }
}

fn paragraph(align: Align, runs: &[Run]) -> String {
    let body: String = runs.iter().map(Run::to_xml).collect();
    format!(
        r#"<w:p><w:pPr><w:jc w:val="{}"/></w:pPr>{body}</w:p>"#,
        align.as_str()
    )
}

fn cell(width: u32, borders: Borders, fill: Option<&str>, content: &str) -> String {
    let shd = fill
        .map(|f| format!(r#"<w:shd w:val="clear" w:color="auto" w:fill="{f}"/>"#))
        .unwrap_or_default();
    format!(
        r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/>{}{shd}</w:tcPr>{content}</w:tc>"#,
        borders.to_xml()
    )
}

fn row(cells: &[String]) -> String {
    format!("<w:tr>{}</w:tr>", cells.concat())
}

fn table(widths: &[u32], rows: &[String]) -> String {
    let total: u32 = widths.iter().sum();
    let grid: String = widths
        .iter()
        .map(|w| format!(r#"<w:gridCol w:w="{w}"/>"#))
        .collect();
    format!(
        r#"<w:tbl><w:tblPr><w:tblW w:w="{total}" w:type="dxa"/><w:jc w:val="left"/><w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid>{grid}</w:tblGrid>{}</w:tbl>"#,
        rows.concat()
    )
}

/// Frame cell holding a nested table; a cell must end with a paragraph.
fn frame_with_table(borders: Borders, inner: String) -> String {
    row(&[cell(FRAME_W, borders, None, &format!("{inner}<w:p/>"))])
}

fn frame_with_paragraph(borders: Borders, para: String) -> String {
    row(&[cell(FRAME_W, borders, None, &para)])
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Render `word/document.xml` for the invoice.
pub(crate) fn render_document_xml(data: &InvoiceData) -> String {
    let mut frame_rows: Vec<String> = Vec::new();

    // 1. title
    let title = Run {
        text: "INVOICE".to_string(),
        font: Some("Arial Black"),
        size_pt: Some(28),
        ..Run::default()
    };
    frame_rows.push(frame_with_paragraph(
        Borders::frame(Some(Edge::Single), Some(Edge::Nil)),
        paragraph(Align::Center, &[title]),
    ));

    // 2. name (left) / date (right)
    let name_date = table(
        &[NAME_W, DATE_W],
        &[row(&[
            cell(
                NAME_W,
                Borders::ALL_NIL,
                None,
                &paragraph(Align::Left, &[Run::bold(&data.name)]),
            ),
            cell(
                DATE_W,
                Borders::ALL_NIL,
                None,
                &paragraph(Align::Right, &[Run::plain(&data.date)]),
            ),
        ])],
    );
    frame_rows.push(frame_with_table(
        Borders::frame(Some(Edge::Nil), Some(Edge::Nil)),
        name_date,
    ));

    // 3. bill to
    let mut bill_runs = vec![Run::bold("Bill To:").with_break()];
    for line in &data.bill_to {
        bill_runs.push(Run::plain(format!("    {line}")).with_break());
    }
    frame_rows.push(frame_with_paragraph(
        Borders::frame(Some(Edge::Nil), Some(Edge::Nil)),
        paragraph(Align::Left, &bill_runs),
    ));

    // 4. table header
    let header = table(
        &[DESC_W, AMOUNT_W],
        &[row(&[
            cell(
                DESC_W,
                Borders::NONE,
                Some(HEADER_FILL),
                &paragraph(Align::Center, &[Run::bold("DESCRIPTION")]),
            ),
            cell(
                AMOUNT_W,
                Borders::NONE,
                Some(HEADER_FILL),
                &paragraph(Align::Center, &[Run::bold("AMOUNT")]),
            ),
        ])],
    );
    frame_rows.push(frame_with_table(Borders::frame(None, None), header));

    // 5. items: salary description, then the detail lines
    let mut item_rows = vec![row(&[
        cell(
            DESC_W,
            Borders::NONE,
            None,
            &paragraph(Align::Left, &[Run::plain(&data.salary_description)]),
        ),
        cell(AMOUNT_W, Borders::NONE, None, &paragraph(Align::Right, &[])),
    ])];
    for line in &data.details {
        let (description, amount) = line.cells();
        item_rows.push(row(&[
            cell(
                DESC_W,
                Borders::NONE,
                None,
                &paragraph(Align::Left, &[Run::plain(description)]),
            ),
            cell(
                AMOUNT_W,
                Borders::NONE,
                None,
                &paragraph(Align::Right, &[Run::plain(amount)]),
            ),
        ]));
    }
    frame_rows.push(frame_with_table(
        Borders::frame(Some(Edge::Nil), Some(Edge::Single)),
        table(&[DESC_W, AMOUNT_W], &item_rows),
    ));

    // 6. total
    let total_borders = Borders {
        left: Some(Edge::Single),
        bottom: Some(Edge::Single),
        ..Borders::NONE
    };
    let total = table(
        &[DESC_W, AMOUNT_W],
        &[row(&[
            cell(
                DESC_W,
                Borders::NONE,
                None,
                &paragraph(Align::Right, &[Run::bold("TOTAL")]),
            ),
            cell(
                AMOUNT_W,
                total_borders,
                Some(TOTAL_FILL),
                &paragraph(Align::Right, &[Run::bold(&data.total)]),
            ),
        ])],
    );
    frame_rows.push(frame_with_table(
        Borders::frame(Some(Edge::Single), Some(Edge::Nil)),
        total,
    ));

    // 7. amount in words
    frame_rows.push(frame_with_paragraph(
        Borders::frame(Some(Edge::Nil), Some(Edge::Single)),
        paragraph(
            Align::Left,
            &[Run::bold("Amount in Words: "), Run::plain(&data.total_words)],
        ),
    ));

    let frame = table(&[FRAME_W], &frame_rows);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>{frame}<w:p/><w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1273" w:bottom="1440" w:left="1273" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn render_styles_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman" w:cs="Times New Roman" w:eastAsia="Times New Roman"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style></w:styles>"#
    )
}

/// Write the invoice package to `path`, replacing any existing file.
pub(crate) fn write_docx(data: &InvoiceData, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);

    let parts: [(&str, String); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ("word/styles.xml", render_styles_xml()),
        ("word/document.xml", render_document_xml(data)),
    ];

    for (name, body) in parts {
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::DetailLine;
    use std::io::Read;
    use tempfile::tempdir;

    fn sample() -> InvoiceData {
        InvoiceData {
            name: "NAME: Jane <Doe>".into(),
            date: "Date: 2025-07-31".into(),
            bill_to: vec!["ACME & Sons".into(), "Bangalore".into()],
            salary_description: "Salary for the month of \"July 2025\" payroll".into(),
            details: vec![
                DetailLine::item("Working Days", "20"),
                DetailLine::Text("Department: AI".into()),
            ],
            total: "25,000/-".into(),
            total_words: "Rs. Twenty Five Thousand Only".into(),
        }
    }

    #[test]
    fn text_is_escaped() {
        let xml = render_document_xml(&sample());
        assert!(xml.contains("NAME: Jane &lt;Doe&gt;"));
        assert!(xml.contains("ACME &amp; Sons"));
        assert!(xml.contains("&quot;July 2025&quot;"));
        assert!(!xml.contains("<Doe>"));
    }

    #[test]
    fn layout_has_shading_and_frame_borders() {
        let xml = render_document_xml(&sample());
        assert_eq!(xml.matches(r#"w:fill="ff99cc""#).count(), 2);
        assert_eq!(xml.matches(r#"w:fill="ffcc99""#).count(), 1);
        assert!(xml.contains(r#"<w:rFonts w:ascii="Arial Black""#));
        assert!(xml.contains(r#"<w:sz w:val="56"/>"#));
        assert!(xml.contains("DESCRIPTION"));
        assert!(xml.contains("AMOUNT"));
        assert!(xml.contains("TOTAL"));
        assert!(xml.contains("Amount in Words: "));
        // legacy line split into two cells
        assert!(xml.contains(">Department<"));
        assert!(xml.contains(">AI<"));
    }

    #[test]
    fn package_contains_all_parts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invoice_july.docx");
        write_docx(&sample(), &path).unwrap();

        let mut archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/document.xml",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing {part}");
        }

        let mut styles = String::new();
        archive
            .by_name("word/styles.xml")
            .unwrap()
            .read_to_string(&mut styles)
            .unwrap();
        assert!(styles.contains("Times New Roman"));
        assert!(styles.contains(r#"<w:sz w:val="22"/>"#));
    }
}
