// src/extract/search.rs
//
// Listing page extractor. One Torrent per box_torrent container; every
// field degrades to "" on its own when its sub-element is missing, and the
// sibling fields are still read even when the whole title block is gone.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use tracing::debug;

use crate::dom::{self, DomNode};
use crate::extract::paging::{self, PageInfo};

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".*id=(\d*)").unwrap());

/// All fields are the site's rendered text, verbatim. Interpreting sizes,
/// counts and timestamps is the consumer's business.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Torrent {
    pub id: String,
    pub title: String,
    pub alt_title: String,
    pub health: String,
    pub peers: String,
    pub seeds: String,
    pub size: String,
    pub uploaded: String,
    pub uploader: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub torrents: Vec<Torrent>,
    pub pager: PageInfo,
}

pub fn parse_doc(doc: &Html) -> SearchPage {
    let boxes = dom::all_by_class(doc.tree.root(), "box_torrent");
    let torrents: Vec<Torrent> = boxes.into_iter().map(parse_torrent).collect();
    debug!(count = torrents.len(), "parsed listing page");
    SearchPage {
        torrents,
        pager: paging::parse_doc(doc),
    }
}

fn parse_torrent(node: DomNode<'_>) -> Torrent {
    let mut t = Torrent::default();
    if let Some(txt) = title_block(node) {
        t.id = extract_id(txt);
        t.title = extract_title(txt);
        t.alt_title = extract_alt_title(txt);
    }
    t.health = class_text(node, "box_d2");
    t.peers = anchor_text(node, "box_l2");
    t.seeds = anchor_text(node, "box_s2");
    t.size = class_text(node, "box_meret2");
    t.uploaded = class_text(node, "box_feltoltve2");
    t.uploader = extract_uploader(node);
    t
}

// Two template variants for the title block.
fn title_block(node: DomNode<'_>) -> Option<DomNode<'_>> {
    dom::first_by_class(node, "torrent_txt").or_else(|| dom::first_by_class(node, "torrent_txt2"))
}

/// Torrent id from the title anchor's href, e.g.
/// `torrents.php?action=details&id=3194285`. Empty unless the id pattern
/// matches exactly once.
fn extract_id(txt: DomNode<'_>) -> String {
    let Some(href) = dom::first_by_tag(txt, "a").and_then(|a| dom::attr(a, "href")) else {
        return s!();
    };
    let mut caps = ID_RE.captures_iter(href);
    match (caps.next(), caps.next()) {
        (Some(c), None) => s!(&c[1]),
        _ => s!(),
    }
}

fn extract_title(txt: DomNode<'_>) -> String {
    dom::first_by_tag(txt, "a")
        .and_then(|a| dom::attr(a, "title"))
        .map(String::from)
        .unwrap_or_default()
}

fn extract_alt_title(txt: DomNode<'_>) -> String {
    dom::first_by_class(txt, "siterank")
        .and_then(|rank| dom::first_by_tag(rank, "span"))
        .and_then(|span| dom::attr(span, "title"))
        .map(String::from)
        .unwrap_or_default()
}

// Peers and seeds live in a nested anchor; a container without the anchor
// yields "" even if it has text of its own.
fn anchor_text(node: DomNode<'_>, class: &str) -> String {
    dom::first_by_class(node, class)
        .and_then(|div| dom::first_by_tag(div, "a"))
        .map(dom::text)
        .unwrap_or_default()
}

fn class_text(node: DomNode<'_>, class: &str) -> String {
    dom::first_by_class(node, class)
        .map(dom::text)
        .unwrap_or_default()
}

fn extract_uploader(node: DomNode<'_>) -> String {
    let Some(div) = dom::first_by_class(node, "box_feltolto2") else {
        return s!();
    };
    let spans = dom::all_by_class(div, "feltolto_szin");
    match spans.first() {
        Some(span) => dom::text(*span),
        None => s!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn torrents(html: &str) -> Vec<Torrent> {
        parse_doc(&dom::parse(html)).torrents
    }

    fn single(html: &str) -> Torrent {
        let mut ts = torrents(html);
        assert_eq!(ts.len(), 1);
        ts.remove(0)
    }

    #[test]
    fn no_torrent_boxes_yields_empty_vec() {
        assert!(torrents("<div />").is_empty());
    }

    #[test]
    fn missing_title_block_leaves_title_fields_empty() {
        let t = single(
            r#"
            <div class="box_torrent">
                <div class="box_nagy"></div>
            </div>"#,
        );
        assert_eq!(t.id, "");
        assert_eq!(t.title, "");
        assert_eq!(t.alt_title, "");
    }

    #[test]
    fn title_block_fallback_class_is_used() {
        let t = single(
            r#"
            <div class="box_torrent">
                <div class="torrent_txt2">
                    <a href="torrents.php?action=details&id=42" title="fallback"></a>
                </div>
            </div>"#,
        );
        assert_eq!(t.id, "42");
        assert_eq!(t.title, "fallback");
    }

    #[test]
    fn anchor_without_title_attribute() {
        let t = single(
            r#"
            <div class="box_torrent">
                <div class="torrent_txt"><a comment="no title attribute" /></div>
            </div>"#,
        );
        assert_eq!(t.title, "");
    }

    #[test]
    fn id_empty_when_href_pattern_does_not_match() {
        let t = single(
            r#"
            <div class="box_torrent">
                <div class="torrent_txt"><a href="torrents.php?action=details" title="x"></a></div>
            </div>"#,
        );
        assert_eq!(t.id, "");
        assert_eq!(t.title, "x");
    }

    #[test]
    fn alt_title_missing_span() {
        let t = single(
            r#"
            <div class="box_torrent">
                <div class="torrent_txt">
                    <div class="siterank" />
                </div>
            </div>"#,
        );
        assert_eq!(t.alt_title, "");
    }

    #[test]
    fn alt_title_span_without_title_attribute() {
        let t = single(
            r#"
            <div class="box_torrent">
                <div class="torrent_txt">
                    <div class="siterank"><span comment="no title attribute"></span></div>
                </div>
            </div>"#,
        );
        assert_eq!(t.alt_title, "");
    }

    #[test]
    fn health_text_and_absences() {
        let with = single(r#"<div class="box_torrent"><div class="box_d2">test</div></div>"#);
        assert_eq!(with.health, "test");
        let missing = single(r#"<div class="box_torrent" />"#);
        assert_eq!(missing.health, "");
        let empty = single(r#"<div class="box_torrent"><div class="box_d2" /></div>"#);
        assert_eq!(empty.health, "");
    }

    #[test]
    fn peers_require_nested_anchor() {
        let with = single(
            r##"<div class="box_torrent"><div class="box_l2"><a href="#">test</a></div></div>"##,
        );
        assert_eq!(with.peers, "test");
        // Text directly in the container does not count.
        let no_anchor = single(r#"<div class="box_torrent"><div class="box_l2">7</div></div>"#);
        assert_eq!(no_anchor.peers, "");
        let empty_anchor =
            single(r##"<div class="box_torrent"><div class="box_l2"><a href="#"></a></div></div>"##);
        assert_eq!(empty_anchor.peers, "");
    }

    #[test]
    fn seeds_require_nested_anchor() {
        let with = single(
            r##"<div class="box_torrent"><div class="box_s2"><a href="#">test</a></div></div>"##,
        );
        assert_eq!(with.seeds, "test");
        let no_anchor = single(r#"<div class="box_torrent"><div class="box_s2"></div></div>"#);
        assert_eq!(no_anchor.seeds, "");
    }

    #[test]
    fn size_text() {
        let t = single(r#"<div class="box_torrent"><div class="box_meret2">test</div></div>"#);
        assert_eq!(t.size, "test");
    }

    #[test]
    fn uploaded_collapses_line_break() {
        let t = single(
            r#"<div class="box_torrent"><div class="box_feltoltve2">test1<br/>test2</div></div>"#,
        );
        assert_eq!(t.uploaded, "test1 test2");
    }

    #[test]
    fn uploader_reads_first_colored_span() {
        let t = single(
            r#"
            <div class="box_torrent">
                <div class="box_feltolto2">
                    <span class="feltolto_szin">first</span>
                    <span class="feltolto_szin">second</span>
                </div>
            </div>"#,
        );
        assert_eq!(t.uploader, "first");
        let no_span = single(r#"<div class="box_torrent"><div class="box_feltolto2" /></div>"#);
        assert_eq!(no_span.uploader, "");
    }
}
