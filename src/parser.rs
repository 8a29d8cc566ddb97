use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::types::{PostalRecord, Province};

static RE_PAREN_FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)").expect("invalid regex: paren footnote"));

static RE_BRACKET_FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("invalid regex: bracket footnote"));

static RE_POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("invalid regex: postal code"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Strips footnote markers like `(1)`, `[2]` and `*`, then collapses
/// whitespace runs to single spaces. Total over any input.
pub fn normalize_text(text: &str) -> String {
    let text = RE_PAREN_FOOTNOTE.replace_all(text, "");
    let text = RE_BRACKET_FOOTNOTE.replace_all(&text, "");
    let text = text.replace('*', "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All `<table>` elements in document order. If the page carries none at
/// all, fall back to scanning the usual blog content containers for
/// nested tables. An empty result is a valid outcome, not an error.
fn locate_tables(document: &Html) -> Vec<ElementRef<'_>> {
    let table_selector = Selector::parse("table").unwrap();

    let tables: Vec<ElementRef> = document.select(&table_selector).collect();
    if !tables.is_empty() {
        return tables;
    }

    log::info!("No tables found on the page. Looking for alternative structures...");
    let content_selector =
        Selector::parse("div.content, div.post-content, div.entry-content").unwrap();
    document
        .select(&content_selector)
        .flat_map(|container| container.select(&table_selector).collect::<Vec<_>>())
        .collect()
}

fn cell_texts(row: ElementRef) -> Vec<String> {
    let cell_selector = Selector::parse("td, th").unwrap();
    row.select(&cell_selector)
        .map(|cell| normalize_text(&elem_text(cell)))
        .collect()
}

fn dump_table_structure(table: ElementRef, table_index: usize) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let row_selector = Selector::parse("tr").unwrap();
    let rows: Vec<ElementRef> = table.select(&row_selector).collect();
    log::debug!("Table {}: {} row(s)", table_index + 1, rows.len());

    for (i, row) in rows.iter().take(5).enumerate() {
        let cells = cell_texts(*row);
        let preview: Vec<String> = cells
            .iter()
            .take(4)
            .map(|text| text.chars().take(50).collect())
            .collect();
        log::debug!("  Row {}: {} cell(s): {:?}", i + 1, cells.len(), preview);
    }
}

fn is_column_header(cells: &[String]) -> bool {
    let joined = cells.join(" ").to_lowercase();
    ["cantón", "distrito", "código"]
        .iter()
        .any(|keyword| joined.contains(keyword))
}

fn validate_record(
    province: Province,
    canton: &str,
    district: &str,
    postal_code: &str,
) -> Option<PostalRecord> {
    if !RE_POSTAL_CODE.is_match(postal_code) {
        log::debug!(
            "Rejected row under {}: invalid postal code {:?}",
            province,
            postal_code
        );
        return None;
    }

    if canton.chars().count() <= 1 || district.chars().count() <= 1 {
        log::debug!(
            "Rejected row under {}: canton {:?} / district {:?} too short",
            province,
            canton,
            district
        );
        return None;
    }

    Some(PostalRecord {
        province,
        canton: canton.to_string(),
        district: district.to_string(),
        postal_code: postal_code.to_string(),
    })
}

/// Walks one table, carrying the province announced by its first row.
///
/// The classification is deliberately permissive: rows that match none of
/// the known shapes are skipped rather than aborting the table, since the
/// source markup is irregular.
fn parse_table(table: ElementRef, records: &mut Vec<PostalRecord>) {
    let row_selector = Selector::parse("tr").unwrap();
    let mut current_province: Option<Province> = None;

    for (row_index, row) in table.select(&row_selector).enumerate() {
        let cells = cell_texts(row);

        // Province headers span the full table width via colspan and so
        // usually surface as a single cell; the first row is checked
        // before the cell-count gate below.
        if row_index == 0
            && let Some(first) = cells.first()
            && let Some(province) = Province::from_name(first)
        {
            log::debug!("Found province: {}", province);
            current_province = Some(province);
            continue;
        }

        if cells.len() < 3 {
            continue;
        }

        if row_index == 1 && is_column_header(&cells) {
            log::debug!("Skipping column header row");
            continue;
        }

        let Some(province) = current_province else {
            continue;
        };

        if let Some(record) = validate_record(province, &cells[0], &cells[1], &cells[2]) {
            if records.contains(&record) {
                continue;
            }
            if records.len() < 10 {
                log::info!("Added: {}", record);
            }
            records.push(record);
        }
    }
}

/// Extracts every valid, deduplicated postal record from the page. The
/// result is in document order; callers sort before emitting.
pub fn parse_postal_records(html: &str) -> Vec<PostalRecord> {
    let document = Html::parse_document(html);
    let tables = locate_tables(&document);
    log::info!("Found {} table(s) on the page", tables.len());

    let mut records: Vec<PostalRecord> = Vec::new();
    for (table_index, table) in tables.into_iter().enumerate() {
        log::debug!("Processing table {}...", table_index + 1);
        dump_table_structure(table, table_index);
        parse_table(table, &mut records);
    }

    log::info!("Total postal codes extracted: {}", records.len());
    records
}

/// Sorts by `(province, canton, district)` with plain string comparison,
/// making the emitted dataset deterministic for a given page.
pub fn sort_records(records: &mut [PostalRecord]) {
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
