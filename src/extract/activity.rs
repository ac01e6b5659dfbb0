// src/extract/activity.rs
//
// Account activity page: the rank/quota summary block plus the per-torrent
// history table.
//
// The summary is all-or-nothing: unless all nine "dd" cells are present in
// document order, the whole block stays at its zero value. Partial data is
// rejected wholesale, never half-populated.

use scraper::Html;
use tracing::{debug, warn};

use crate::dom::{self, DomNode};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityInfo {
    pub rank: Rank,
    /// Rendered download-eligibility flag, e.g. "Igen"/"Nem".
    pub can_download: String,
    pub quota: QuotaStats,
    pub history: Vec<HistoryEntry>,
}

/// Ratio rank over the site's four reporting windows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rank {
    pub daily: String,
    pub weekly: String,
    pub monthly: String,
    pub prev_month: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuotaStats {
    pub current: String,
    pub allowed: String,
    pub penalty_months: String,
    pub penalty_torrents: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryEntry {
    pub name: String,
    pub started: String,
    pub last_active: String,
    pub seeding: String,
    pub uploaded: String,
    pub downloaded: String,
    pub remaining: String,
    pub ratio: String,
}

pub fn parse_doc(doc: &Html) -> ActivityInfo {
    let root = doc.tree.root();
    let mut info = ActivityInfo::default();
    parse_summary(root, &mut info);
    info.history = parse_history(root);
    debug!(entries = info.history.len(), "parsed activity page");
    info
}

fn parse_summary(root: DomNode<'_>, info: &mut ActivityInfo) {
    let Some(block) = find_summary_block(root) else {
        return;
    };
    let cells = dom::all_by_class(block, "dd");
    if cells.len() < 9 {
        warn!(cells = cells.len(), "quota table incomplete, leaving summary empty");
        return;
    }
    info.rank = Rank {
        daily: dom::text(cells[0]),
        weekly: dom::text(cells[1]),
        monthly: dom::text(cells[2]),
        prev_month: dom::text(cells[3]),
    };
    info.can_download = dom::text(cells[4]);
    info.quota = QuotaStats {
        current: dom::text(cells[5]),
        allowed: dom::text(cells[6]),
        penalty_months: dom::text(cells[7]),
        penalty_torrents: dom::text(cells[8]),
    };
}

// Several same-class content boxes exist on the page; the summary is the
// one that actually contains "dd" cells.
fn find_summary_block(root: DomNode<'_>) -> Option<DomNode<'_>> {
    dom::all_by_class(root, "fobox_tartalom")
        .into_iter()
        .find(|block| dom::first_by_class(*block, "dd").is_some())
}

fn parse_history(root: DomNode<'_>) -> Vec<HistoryEntry> {
    // Two striping classes; the site alternates them row by row.
    let mut rows = dom::all_by_class(root, "hnr_all");
    rows.extend(dom::all_by_class(root, "hnr_all2"));
    rows.into_iter().map(parse_history_row).collect()
}

fn parse_history_row(row: DomNode<'_>) -> HistoryEntry {
    HistoryEntry {
        name: parse_name(row),
        started: div_text(row, "hnr_tstart"),
        last_active: div_text(row, "hnr_tlastactive"),
        seeding: nested_text(row, "hnr_tseed"),
        uploaded: div_text(row, "hnr_tup"),
        downloaded: div_text(row, "hnr_tdown"),
        remaining: nested_text(row, "hnr_ttimespent"),
        ratio: nested_text(row, "hnr_tratio"),
    }
}

fn parse_name(row: DomNode<'_>) -> String {
    dom::first_by_tag(row, "a")
        .and_then(|a| dom::attr(a, "title"))
        .map(String::from)
        .unwrap_or_default()
}

fn div_text(row: DomNode<'_>, class: &str) -> String {
    dom::first_by_class(row, class)
        .map(dom::text)
        .unwrap_or_default()
}

// These columns wrap their value in a span, so the text primitive is
// applied to the div's first child rather than the div itself.
fn nested_text(row: DomNode<'_>, class: &str) -> String {
    dom::first_by_class(row, class)
        .and_then(|div| div.first_child())
        .map(dom::text)
        .unwrap_or_default()
}
