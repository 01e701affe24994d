use std::sync::LazyLock;
use log::{debug, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use crate::error::ResultError;
use crate::models::{AcademicRecord, ResultFlag, SubjectEntry};

// Stands in for a name or seat number the page does not print.
const UNKNOWN: &str = "Unknown";
const MIN_SEAT_LEN: usize = 5;
const MIN_CELLS: usize = 7;

// The label cell and the value cell sit next to each other: `<td>Student Name</td><td><b>: </b>NAME</td>`.
// Only markup may separate them, so an empty value cell never borrows the next row's value.
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Student Name\s*(?:</?[a-z][^>]*>\s*){0,8}?<td[^>]*>\s*<b>\s*:\s*</b>\s*([^<]+)</td>").expect("name pattern")
});
static SEMESTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Semester\s*:\s*(\d+)").expect("semester pattern"));
static SEAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)University Seat Number\s*(?:</?[a-z][^>]*>\s*){0,8}?<td[^>]*>\s*<b>\s*:\s*</b>\s*([^<]+)</td>").expect("seat pattern")
});

/// Raw text of the cells of one subject row, before any numeric interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub code: String,
    pub name: String,
    pub internal: String,
    pub external: String,
    pub total: String,
    pub result: String,
    pub announced: String,
}

/// Turns a parsed result page into candidate subject rows.
///
/// This is the only place that knows how the upstream page lays out its subject table,
/// so a layout change on the result site means swapping the implementation here.
pub trait RowSource {
    fn document_to_rows(&self, document: &Html) -> Vec<RawRow>;
}

/// Rows laid out as `div.divTableBody > div.divTableRow > div.divTableCell`, one block per table,
/// with a header row whose first cell reads "Subject Code".
pub struct DivTableRows;

static BODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".divTableBody").expect("body selector"));
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".divTableRow").expect("row selector"));
static CELL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".divTableCell").expect("cell selector"));

impl RowSource for DivTableRows {
    fn document_to_rows(&self, document: &Html) -> Vec<RawRow> {
        let mut rows = Vec::new();
        for body in document.select(&BODY_SEL) {
            for row in body.select(&ROW_SEL) {
                let cells: Vec<String> = row.select(&CELL_SEL).map(cell_text).collect();
                if cells.first().is_some_and(|c| c.contains("Subject Code")) {
                    continue;
                }
                if cells.len() < MIN_CELLS {
                    continue;
                }
                let mut cells = cells.into_iter();
                let mut next = || cells.next().unwrap_or_default();
                rows.push(RawRow {
                    code: next(),
                    name: next(),
                    internal: next(),
                    external: next(),
                    total: next(),
                    result: next(),
                    announced: next(),
                });
            }
        }
        rows
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

// Reads the leading digits of a cell, the way a lenient integer parse would. Blank or non-numeric cells count as zero.
fn leading_int(raw: &str) -> u32 {
    let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

fn capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts a record using the default result-page layout.
pub fn extract(html: &str, fallback_identifier: &str) -> Result<AcademicRecord, ResultError> {
    extract_with(&DivTableRows, html, fallback_identifier)
}

/// Extracts a record, reading subject rows through the given row source.
pub fn extract_with(
    source: &dyn RowSource,
    html: &str,
    fallback_identifier: &str,
) -> Result<AcademicRecord, ResultError> {
    let fallback = fallback_identifier.trim();
    if html.trim().is_empty() {
        return Err(ResultError::Parse(format!("empty document for {}", fallback)));
    }

    let student_name = capture(&NAME_RE, html).unwrap_or_else(|| {
        debug!("No student name found for {}", fallback);
        UNKNOWN.to_string()
    });
    let semester = capture(&SEMESTER_RE, html).and_then(|s| s.parse().ok()).unwrap_or(0);
    let identifier = match capture(&SEAT_RE, html) {
        Some(seat) if seat.chars().count() >= MIN_SEAT_LEN => seat.to_uppercase(),
        _ if !fallback.is_empty() => fallback.to_string(),
        _ => {
            warn!("No seat number on the page and none supplied");
            UNKNOWN.to_string()
        }
    };

    let document = Html::parse_document(html);
    let mut subjects: Vec<SubjectEntry> = Vec::new();
    for row in source.document_to_rows(&document) {
        if row.code.is_empty() || row.name.is_empty() {
            continue;
        }
        if subjects.iter().any(|s| s.code == row.code) {
            warn!("Duplicate subject code {} for {}, keeping the first row", row.code, identifier);
            continue;
        }
        subjects.push(SubjectEntry {
            internal_marks: leading_int(&row.internal),
            external_marks: leading_int(&row.external),
            total_marks: leading_int(&row.total),
            result: ResultFlag::from_raw(&row.result),
            announced_date: row.announced,
            credits: 0,
            code: row.code,
            name: row.name,
        });
    }

    if subjects.is_empty() {
        return Err(ResultError::Parse(format!("no subject rows for {}", identifier)));
    }

    debug!("Extracted {} subjects for {}", subjects.len(), identifier);
    Ok(AcademicRecord { identifier, student_name, semester, subjects })
}
