// src/extract/details.rs
//
// Detail page extractor. The page's content-type label picks which field
// set applies; the variants are a closed set, so the record is an enum and
// a variant can only ever carry its own fields. Shared plumbing is the
// two-column labeled table under the "inforbar_txt" block (sic — the class
// name is the site's own typo).

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use tracing::{debug, warn};

use crate::dom::{self, DomNode};

// External links are smuggled through a redirect href; only the part after
// the last '?' counts, and it has to be a plain http(s) URL.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".*\?(https?://.*)").unwrap());

// Row labels as the site renders them.
const LABEL_YEAR: &str = "Megjelenés éve:";
const LABEL_DIRECTOR: &str = "Rendező:";
const LABEL_ACTORS: &str = "Szereplők:";
const LABEL_COUNTRY: &str = "Ország:";
const LABEL_TAGS: &str = "Címkék:";
const LABEL_IMDB_RATING: &str = "IMDb értékelés:";
const LABEL_IMDB_LINK: &str = "IMDb link:";
const LABEL_LENGTH: &str = "Hossz:";
const LABEL_OTHER_LINK: &str = "Egyéb link:";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Details {
    /// Lower-cased content-type label, verbatim ("film", "zene", ...).
    /// Kept even when the label is not one we know how to dispatch on.
    pub kind: String,
    pub content: Content,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Content {
    Video(VideoInfo),
    Software(SoftwareInfo),
    Music(MusicInfo),
    Ebook(EbookInfo),
    #[default]
    Unknown,
}

/// Movies and series share one field set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VideoInfo {
    pub title: String,
    pub release_year: String,
    pub director: String,
    pub actors: String,
    pub country: String,
    pub labels: String,
    pub imdb_rating: String,
    pub imdb_link: String,
    pub length: String,
    pub other_link: String,
    pub cover_image: String,
    pub other_images: Vec<String>,
}

/// Games and programs share one field set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SoftwareInfo {
    pub title: String,
    pub cover_image: String,
    pub other_images: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MusicInfo {
    pub title: String,
    pub cover_image: String,
    pub labels: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EbookInfo {
    pub title: String,
    pub cover_image: String,
    pub other_images: Vec<String>,
    pub labels: String,
}

pub fn parse_doc(doc: &Html) -> Details {
    let root = doc.tree.root();
    let kind = parse_kind(root);
    let content = match kind.as_str() {
        "film" | "sorozat" => Content::Video(parse_video(root)),
        "játék" | "program" => Content::Software(parse_software(root)),
        "zene" => Content::Music(parse_music(root)),
        "ebook" => Content::Ebook(parse_ebook(root)),
        "" => Content::Unknown,
        other => {
            warn!(label = other, "unrecognized content type label");
            Content::Unknown
        }
    };
    debug!(kind = kind.as_str(), "parsed detail page");
    Details { kind, content }
}

fn parse_kind(root: DomNode<'_>) -> String {
    dom::first_by_class(root, "torrent_reszletek")
        .and_then(|div| dom::first_by_tag(div, "a"))
        .map(|a| dom::text(a).to_lowercase())
        .unwrap_or_default()
}

fn parse_video(root: DomNode<'_>) -> VideoInfo {
    VideoInfo {
        title: class_text(root, "infobar_title"),
        release_year: table_text(root, LABEL_YEAR),
        director: table_text(root, LABEL_DIRECTOR),
        actors: table_text(root, LABEL_ACTORS),
        country: table_text(root, LABEL_COUNTRY),
        labels: parse_labels(root),
        imdb_rating: table_text(root, LABEL_IMDB_RATING),
        imdb_link: table_link(root, LABEL_IMDB_LINK),
        length: table_text(root, LABEL_LENGTH),
        other_link: table_link(root, LABEL_OTHER_LINK),
        cover_image: parse_cover_image(root),
        other_images: parse_other_images(root),
    }
}

fn parse_software(root: DomNode<'_>) -> SoftwareInfo {
    SoftwareInfo {
        title: class_text(root, "torrent_reszletek_cim"),
        cover_image: parse_cover_image(root),
        other_images: parse_other_images(root),
    }
}

fn parse_music(root: DomNode<'_>) -> MusicInfo {
    MusicInfo {
        title: class_text(root, "torrent_reszletek_cim"),
        cover_image: parse_cover_image(root),
        labels: parse_labels(root),
    }
}

fn parse_ebook(root: DomNode<'_>) -> EbookInfo {
    EbookInfo {
        title: class_text(root, "torrent_reszletek_cim"),
        cover_image: parse_cover_image(root),
        other_images: parse_other_images(root),
        labels: parse_labels(root),
    }
}

/// Tags are rendered as one anchor each; space-join the non-empty ones.
fn parse_labels(root: DomNode<'_>) -> String {
    let Some(cell) = table_cell(root, LABEL_TAGS) else {
        return s!();
    };
    let labels: Vec<String> = dom::all_by_tag(cell, "a")
        .into_iter()
        .map(dom::text)
        .filter(|label| !label.is_empty())
        .collect();
    labels.join(" ")
}

/// Single cover image under the description block.
fn parse_cover_image(root: DomNode<'_>) -> String {
    dom::first_by_class(root, "torrent_leiras")
        .and_then(|div| dom::first_by_tag(div, "img"))
        .and_then(|img| dom::attr(img, "src"))
        .map(String::from)
        .unwrap_or_default()
}

/// Gallery images sit in a centered block inside the outer content box.
fn parse_other_images(root: DomNode<'_>) -> Vec<String> {
    let Some(center) = dom::first_by_class(root, "fobox_tartalom")
        .and_then(|div| dom::first_by_tag(div, "center"))
    else {
        return Vec::new();
    };
    dom::all_by_tag(center, "img")
        .into_iter()
        .filter_map(|img| dom::attr(img, "src"))
        .map(String::from)
        .collect()
}

fn class_text(root: DomNode<'_>, class: &str) -> String {
    dom::first_by_class(root, class)
        .map(dom::text)
        .unwrap_or_default()
}

fn table_text(root: DomNode<'_>, label: &str) -> String {
    table_cell(root, label).map(dom::text).unwrap_or_default()
}

fn table_link(root: DomNode<'_>, label: &str) -> String {
    let Some(href) = table_cell(root, label)
        .and_then(|cell| dom::first_by_tag(cell, "a"))
        .and_then(|a| dom::attr(a, "href"))
    else {
        return s!();
    };
    match LINK_RE.captures(href) {
        Some(caps) => s!(&caps[1]),
        None => s!(),
    }
}

/// Value cell of the first labeled row whose label cell's text equals
/// `label` exactly. Rows are two <td> cells: label, value.
fn table_cell<'a>(root: DomNode<'a>, label: &str) -> Option<DomNode<'a>> {
    let info = dom::first_by_class(root, "inforbar_txt")?;
    let tbody = dom::first_by_tag(info, "tbody")?;
    for row in dom::all_by_tag(tbody, "tr") {
        let cells = dom::all_by_tag(row, "td");
        if cells.len() == 2 && dom::text(cells[0]) == label {
            return Some(cells[1]);
        }
    }
    None
}
