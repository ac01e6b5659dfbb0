// src/extract/paging.rs
//
// Page number inference from the pager's rendered labels.
//
// The pager renders numeric range labels ("1-25", "26-50", ...) as <a>
// links plus exactly one non-clickable <span> for the page being viewed,
// and first/last jump links with plain-word labels. Page numbers are
// POSITIONAL: the current page is the 1-based position of the active label
// among the numeric labels, not anything read out of the label text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use tracing::debug;

use crate::dom::{self, DomNode};

/// Fallback when the pager is missing or its active label is unreadable.
pub const DEFAULT_PAGE: u32 = 1;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+-\d+$").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub current: u32,
    pub prev: u32,
    pub next: u32,
}

impl Default for PageInfo {
    fn default() -> Self {
        PageInfo {
            current: DEFAULT_PAGE,
            prev: DEFAULT_PAGE,
            next: DEFAULT_PAGE,
        }
    }
}

pub fn parse_doc(doc: &Html) -> PageInfo {
    let Some(pager) = dom::first_by_id(doc.tree.root(), "pager_bottom") else {
        return PageInfo::default();
    };

    // Numeric labels in document order; remember where the active one sits.
    let mut numeric = 0usize;
    let mut active_idx = None;
    for node in pager.descendants() {
        let Some(el) = node.value().as_element() else {
            continue;
        };
        // The active label is the one not rendered as a link.
        let active = match el.name() {
            "a" => false,
            "span" => true,
            _ => continue,
        };
        if !RANGE_RE.is_match(&label_text(node)) {
            if active {
                // Unreadable active label: no inference possible at all.
                debug!("active pager label is not a numeric range");
                return PageInfo::default();
            }
            continue; // jump link ("Első"/"Utolsó") or noise
        }
        if active {
            active_idx = Some(numeric);
        }
        numeric += 1;
    }

    let Some(idx) = active_idx else {
        return PageInfo::default();
    };
    let current = idx as u32 + 1;
    PageInfo {
        current,
        prev: if idx == 0 { current } else { current - 1 },
        next: if idx + 1 == numeric { current } else { current + 1 },
    }
}

fn label_text(label: DomNode<'_>) -> String {
    match dom::first_by_tag(label, "strong") {
        Some(strong) => dom::text(strong),
        None => s!(),
    }
}
