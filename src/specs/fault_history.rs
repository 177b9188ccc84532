// src/specs/fault_history.rs
//! Error-history tables.
//!
//! Locator chain, each link searched inside the previous one:
//! `container (tag+attrs)` → `heading (tag+text)`, optional → first
//! `table (tag+attrs)` after the heading. Containers are tried in document
//! order; the first one that yields a table wins. Any broken link means an
//! empty history, not an error.
//!
//! Rows keep their source order. A row is read only if it has at least
//! `max(error_column, page_column) + 1` cells; shorter rows (header rows
//! made of `<th>` included) are skipped with a warning.

use scraper::{ElementRef, Html};

use crate::core::html::{elements, find_by_text, find_first, has_tag, matches, trimmed_text};
use crate::core::sanitize::normalize_locator;
use crate::device::{FaultRecord, TableSelector};

pub fn extract_fault_history(doc: &Html, spec: &TableSelector) -> Vec<FaultRecord> {
    let root = doc.root_element();
    let containers: Vec<ElementRef<'_>> = elements(root)
        .filter(|el| matches(*el, &spec.container.tag, &spec.container.attrs))
        .collect();

    if containers.is_empty() {
        logw!("Error history: no <{}> container matching {:?}", spec.container.tag, spec.container.attrs);
        return Vec::new();
    }

    let Some(table) = containers.iter().find_map(|c| locate_table(*c, spec)) else {
        match &spec.heading {
            Some(h) => logw!(
                "Error history: no <{}> after heading '{}' in {} container(s)",
                spec.table.tag, h.text, containers.len()
            ),
            None => logw!("Error history: no <{}> matching {:?}", spec.table.tag, spec.table.attrs),
        }
        return Vec::new();
    };

    read_rows(table, spec)
}

fn locate_table<'a>(container: ElementRef<'a>, spec: &TableSelector) -> Option<ElementRef<'a>> {
    let Some(h) = &spec.heading else {
        return find_first(container, &spec.table.tag, &spec.table.attrs);
    };
    let heading = find_by_text(container, &h.tag, &h.text)?;
    let heading_id = heading.id();
    elements(container)
        .skip_while(|el| el.id() != heading_id)
        .skip(1)
        .find(|el| matches(*el, &spec.table.tag, &spec.table.attrs))
}

fn read_rows(table: ElementRef<'_>, spec: &TableSelector) -> Vec<FaultRecord> {
    let need = spec.min_cells();
    let mut out = Vec::new();

    for (i, row) in elements(table).filter(|el| has_tag(*el, &spec.row_tag)).enumerate() {
        let cells: Vec<ElementRef<'_>> = elements(row)
            .filter(|el| has_tag(*el, &spec.cell_tag))
            .collect();
        let (Some(error), Some(page)) = (cells.get(spec.error_column), cells.get(spec.page_column)) else {
            logw!("Error history: row {i} has {} <{}> cell(s), need {need}; skipped", cells.len(), spec.cell_tag);
            continue;
        };
        let description = trimmed_text(*error);
        let locator = normalize_locator(&page.text().collect::<String>());
        out.push(FaultRecord::new(description, locator));
    }

    logd!("Error history: {} record(s)", out.len());
    out
}
