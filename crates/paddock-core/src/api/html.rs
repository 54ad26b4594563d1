//! Results-table extraction from the results site's HTML.
//!
//! The pages are plain server-rendered tables, so a small tag walker is
//! enough: find each `<tr>`, collect the text of its `<td>` cells and the
//! first link in the row. Tag matching is ASCII case-insensitive.

use tracing::debug;

use crate::models::{split_driver_cell, RawRow, ScheduledEvent};

/// One body row of a results table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub link: Option<String>,
}

/// Find the next `<tag ...>...</tag>` block at or after `from`.
/// Returns byte offsets of the block start and end (exclusive).
fn next_tag_block(doc: &str, lower: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let mut search = from;
    let start = loop {
        let idx = lower.get(search..)?.find(&open)? + search;
        // Reject longer tag names sharing the prefix (<tr> vs <track>)
        match lower.as_bytes().get(idx + open.len()) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => break idx,
            _ => search = idx + open.len(),
        }
    };
    let open_end = doc[start..].find('>')? + start + 1;
    let end = lower[open_end..].find(&close)? + open_end + close.len();
    Some((start, end))
}

/// All `<tag>` blocks inside `doc`, in document order.
fn tag_blocks<'a>(doc: &'a str, tag: &str) -> Vec<&'a str> {
    let lower = doc.to_ascii_lowercase();
    let mut blocks = Vec::new();
    let mut pos = 0;
    while let Some((start, end)) = next_tag_block(doc, &lower, tag, pos) {
        blocks.push(&doc[start..end]);
        pos = end;
    }
    blocks
}

/// Inner HTML of a complete block like `<td ...>INNER</td>`.
fn inner_html(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(open_end), Some(close_start)) if close_start > open_end => &block[open_end + 1..close_start],
        _ => "",
    }
}

/// Remove every `<...>` tag, decode entities and collapse whitespace.
pub fn text_content(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}

/// Decode the handful of entities the results pages use.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "nbsp" => Some(' '),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "lt" => Some('<'),
                "gt" => Some('>'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out.replace('\u{a0}', " ")
}

/// Collapse runs of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Value of the first `href="..."` attribute in `block`.
fn first_href(block: &str) -> Option<String> {
    let lower = block.to_ascii_lowercase();
    let idx = lower.find("href=")? + "href=".len();
    let rest = &block[idx..];
    let (quote, body) = match rest.chars().next()? {
        q @ ('"' | '\'') => (q, &rest[1..]),
        _ => (' ', rest),
    };
    let end = body.find(|c: char| c == quote || c == '>').unwrap_or(body.len());
    let href = decode_entities(body[..end].trim());
    (!href.is_empty()).then_some(href)
}

/// Cell text: the `<p>` inside the cell when there is one, else the whole cell.
fn cell_text(td: &str) -> String {
    let inner = inner_html(td);
    match tag_blocks(inner, "p").first() {
        Some(p) => text_content(inner_html(p)),
        None => text_content(inner),
    }
}

/// Parse the body rows of the first table in `doc`. The header row is skipped.
pub fn parse_table(doc: &str) -> Vec<TableRow> {
    tag_blocks(doc, "tr")
        .into_iter()
        .skip(1)
        .map(|tr| TableRow {
            cells: tag_blocks(tr, "td").into_iter().map(cell_text).collect(),
            link: first_href(tr),
        })
        .filter(|row| !row.cells.is_empty())
        .collect()
}

/// Convert an event results page into raw rows.
///
/// Columns: position, car number, driver (name followed by code), team, laps,
/// time or retirement reason, points. Single-cell rows are footnotes.
pub fn parse_results(doc: &str) -> Vec<RawRow> {
    let rows: Vec<RawRow> = parse_table(doc)
        .into_iter()
        .filter(|row| row.cells.len() > 1)
        .map(|row| {
            let cell = |i: usize| row.cells.get(i).filter(|c| !c.is_empty()).cloned();
            let (competitor_name, competitor_code) = match cell(2).as_deref().and_then(split_driver_cell) {
                Some((name, code)) => (Some(name), Some(code)),
                None => (None, None),
            };
            RawRow {
                position: cell(0),
                car_number: cell(1),
                competitor_name,
                competitor_code,
                team: cell(3),
                laps: cell(4),
                time: cell(5),
                points: cell(6),
            }
        })
        .collect();
    debug!(rows = rows.len(), "Parsed results table");
    rows
}

/// Convert a season overview page into schedule entries. Rows without a
/// results link (races not yet run) are left out.
pub fn parse_schedule(doc: &str) -> Vec<ScheduledEvent> {
    parse_table(doc)
        .into_iter()
        .filter_map(|row| {
            let location = row.cells.first().filter(|c| !c.is_empty())?.clone();
            let reference = row.link?;
            Some(ScheduledEvent::new(location, reference))
        })
        .collect()
}
