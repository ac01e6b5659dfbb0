// src/dom.rs
//
// Predicate-based queries over a parsed HTML tree.
//
// Deliberately not CSS selectors: the site's templates are matched on the
// *whole* class attribute (`class="foo bar"` does not answer a query for
// "foo"), and the text normalization below is what every extractor's
// expectations are written against.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Read handle on one node of a parsed document. The document owns the
/// tree; extractors only ever hold these borrows.
pub type DomNode<'a> = NodeRef<'a, Node>;

/// Parse a raw HTML page. html5ever error-corrects, so this never fails;
/// a garbage input just produces a tree with nothing for the extractors
/// to find.
pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

/// First node matching `pred`, depth-first pre-order (the node itself is
/// visited before its children, children left to right).
pub fn find_first<'a, P>(root: DomNode<'a>, pred: P) -> Option<DomNode<'a>>
where
    P: Fn(DomNode<'a>) -> bool,
{
    root.descendants().find(|n| pred(*n))
}

/// All nodes matching `pred`, in traversal order. Always the complete
/// sequence, never a truncated one.
pub fn find_all<'a, P>(root: DomNode<'a>, pred: P) -> Vec<DomNode<'a>>
where
    P: Fn(DomNode<'a>) -> bool,
{
    root.descendants().filter(|n| pred(*n)).collect()
}

pub fn first_by_id<'a>(root: DomNode<'a>, id: &str) -> Option<DomNode<'a>> {
    find_first(root, |n| attr_eq(n, "id", id))
}

pub fn first_by_class<'a>(root: DomNode<'a>, class: &str) -> Option<DomNode<'a>> {
    find_first(root, |n| attr_eq(n, "class", class))
}

pub fn all_by_class<'a>(root: DomNode<'a>, class: &str) -> Vec<DomNode<'a>> {
    find_all(root, |n| attr_eq(n, "class", class))
}

pub fn first_by_tag<'a>(root: DomNode<'a>, tag: &str) -> Option<DomNode<'a>> {
    find_first(root, |n| has_tag(n, tag))
}

pub fn all_by_tag<'a>(root: DomNode<'a>, tag: &str) -> Vec<DomNode<'a>> {
    find_all(root, |n| has_tag(n, tag))
}

/// Direct-child text of a node: each text segment trimmed, each non-text
/// child (e.g. a `<br>`) contributing a single space, final result trimmed
/// again. `test1<br>test2` comes out as "test1 test2".
pub fn text(node: DomNode<'_>) -> String {
    let mut out = s!();
    for child in node.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t.text.trim()),
            _ => out.push(' '),
        }
    }
    out.trim().to_string()
}

/// Attribute value on an element node; `None` for non-elements and missing
/// keys. html5ever keeps the first occurrence of a duplicated attribute,
/// so this is first-match-wins over the source.
pub fn attr<'a>(node: DomNode<'a>, key: &str) -> Option<&'a str> {
    node.value().as_element().and_then(|el| el.attr(key))
}

fn has_tag(node: DomNode<'_>, tag: &str) -> bool {
    node.value().as_element().is_some_and(|el| el.name() == tag)
}

fn attr_eq(node: DomNode<'_>, key: &str, value: &str) -> bool {
    attr(node, key) == Some(value)
}
