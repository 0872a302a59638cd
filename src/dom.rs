//! Uniform navigation over a parsed HTML document.
//!
//! [`PageNode`] wraps the two node kinds the extractors care about, elements
//! and text, behind one small capability set: `tag`, `attr`, `text`,
//! `children` and `parent`. Every search in this module goes through that
//! interface, so the extraction heuristics never touch `scraper` internals
//! directly.
//!
//! # Ancestor search
//!
//! [`nearest_ancestor`] and [`enclosing_region`] answer "which container
//! holds this node?" using an ordered list of [`Accept`] rules, tried from the
//! nearest ancestor outwards.

use regex::Regex;
use scraper::{ElementRef, Html, Node};

/// An element or a text node inside a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNode<'a> {
    Element(ElementRef<'a>),
    Text {
        parent: ElementRef<'a>,
        content: &'a str,
    },
}

impl<'a> PageNode<'a> {
    /// The document's root element.
    pub fn root(document: &'a Html) -> Self {
        PageNode::Element(document.root_element())
    }

    /// Lower-case tag name, or `None` for text nodes.
    pub fn tag(&self) -> Option<&'a str> {
        match self {
            PageNode::Element(el) => Some(el.value().name()),
            PageNode::Text { .. } => None,
        }
    }

    /// Attribute value, or `None` for text nodes and missing attributes.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self {
            PageNode::Element(el) => el.value().attr(name),
            PageNode::Text { .. } => None,
        }
    }

    /// Whether the `class` attribute contains `class` as a whole token.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// All text beneath this node, concatenated in document order.
    pub fn text(&self) -> String {
        match self {
            PageNode::Element(el) => el.text().collect(),
            PageNode::Text { content, .. } => (*content).to_string(),
        }
    }

    /// Element and text children in document order. Comments and other
    /// node kinds are skipped.
    pub fn children(&self) -> Vec<PageNode<'a>> {
        match self {
            PageNode::Element(el) => {
                let parent = *el;
                el.children()
                    .filter_map(|child| match child.value() {
                        Node::Element(_) => ElementRef::wrap(child).map(PageNode::Element),
                        Node::Text(text) => Some(PageNode::Text {
                            parent,
                            content: &**text,
                        }),
                        _ => None,
                    })
                    .collect()
            }
            PageNode::Text { .. } => Vec::new(),
        }
    }

    /// The enclosing element, if any.
    pub fn parent(&self) -> Option<PageNode<'a>> {
        match self {
            PageNode::Element(el) => el.parent().and_then(ElementRef::wrap).map(PageNode::Element),
            PageNode::Text { parent, .. } => Some(PageNode::Element(*parent)),
        }
    }
}

/// Collect every node beneath `root` (excluding `root`) that satisfies
/// `predicate`, in document order.
pub fn find_all<'a, F>(root: PageNode<'a>, predicate: F) -> Vec<PageNode<'a>>
where
    F: Fn(&PageNode<'a>) -> bool,
{
    let mut found = Vec::new();
    let mut stack: Vec<PageNode<'a>> = root.children().into_iter().rev().collect();

    while let Some(node) = stack.pop() {
        if predicate(&node) {
            found.push(node);
        }
        stack.extend(node.children().into_iter().rev());
    }

    found
}

/// Text nodes beneath `root` whose content matches `pattern`.
pub fn find_text<'a>(root: PageNode<'a>, pattern: &Regex) -> Vec<PageNode<'a>> {
    find_all(root, |node| match node {
        PageNode::Text { content, .. } => pattern.is_match(content),
        PageNode::Element(_) => false,
    })
}

/// `<tag>` elements beneath `root` whose `attr` value matches `pattern`.
pub fn find_by_attr<'a>(
    root: PageNode<'a>,
    tag: &str,
    attr: &str,
    pattern: &Regex,
) -> Vec<PageNode<'a>> {
    find_all(root, |node| {
        node.tag() == Some(tag) && node.attr(attr).is_some_and(|value| pattern.is_match(value))
    })
}

/// One acceptance rule for ancestor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Any element with this tag name.
    Tag(&'static str),
    /// An element with this tag name carrying this class token.
    TagClass {
        tag: &'static str,
        class: &'static str,
    },
}

impl Accept {
    pub fn matches(&self, node: &PageNode<'_>) -> bool {
        match *self {
            Accept::Tag(tag) => node.tag() == Some(tag),
            Accept::TagClass { tag, class } => node.tag() == Some(tag) && node.has_class(class),
        }
    }
}

/// Walk from `start` towards the root and return the first node accepted by
/// any of `rules`. `start` itself is considered only when `include_self` is
/// set.
pub fn nearest_ancestor<'a>(
    start: PageNode<'a>,
    include_self: bool,
    rules: &[Accept],
) -> Option<PageNode<'a>> {
    let accepted = |node: &PageNode<'a>| rules.iter().any(|rule| rule.matches(node));

    if include_self && accepted(&start) {
        return Some(start);
    }

    let mut current = start.parent();
    while let Some(node) = current {
        if accepted(&node) {
            return Some(node);
        }
        current = node.parent();
    }
    None
}

/// Locate the content region that encloses `marker`.
///
/// 1. The nearest block ancestor (per `block`) of the marker is found; without
///    one there is no region.
/// 2. If that block is itself a `preferred` container, it is the region.
/// 3. Otherwise the nearest `preferred` ancestor of the block is used,
/// 4. then the next `block` ancestor one level further out,
/// 5. and finally the block from step 1.
pub fn enclosing_region<'a>(
    marker: PageNode<'a>,
    block: &[Accept],
    preferred: &[Accept],
) -> Option<PageNode<'a>> {
    let container = nearest_ancestor(marker, true, block)?;

    if preferred.iter().any(|rule| rule.matches(&container)) {
        return Some(container);
    }

    nearest_ancestor(container, false, preferred)
        .or_else(|| nearest_ancestor(container, false, block))
        .or(Some(container))
}
