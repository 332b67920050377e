//! Template markup codec.
//!
//! Parses the markup inside a `<template>` section into a [`Node`] tree and
//! writes a tree back out. The parser is lenient in the same ways
//! browser-style HTML parsers are:
//!
//! - tag and attribute names keep their case (`<MyButton>` stays `MyButton`)
//! - `<x/>` closes any element, not only HTML void elements
//! - HTML void elements (`<br>`, `<img>`, ...) never take children
//! - a `<` that cannot start a tag is plain text, so `{{ a < b }}` survives
//! - a closing tag with no open counterpart is dropped
//! - elements still open at end of input are closed implicitly
//!
//! Text is carried verbatim, entities are not decoded, and comments are kept,
//! so `serialize_nodes(parse_markup(s)?)` reproduces well-formed input exactly.

pub(crate) mod lexer;
mod node;

pub use node::{Attributes, Element, Node};

use lexer::{LexError, Lexer, Token};

/// HTML elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Markup could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MarkupError {
    pub message: String,
}

impl MarkupError {
    pub(crate) fn from_lex(err: &LexError, source: &str) -> Self {
        Self {
            message: err.describe(source),
        }
    }
}

/// Parse a markup fragment into a list of top-level nodes.
pub fn parse_markup(markup: &str) -> Result<Vec<Node>, MarkupError> {
    let mut lexer = Lexer::new(markup);
    // Root frame has no element; open elements are pushed above it.
    let mut stack: Vec<(Option<Element>, Vec<Node>)> = vec![(None, Vec::new())];

    while let Some((token, _)) =
        lexer.next_token().map_err(|e| MarkupError::from_lex(&e, markup))?
    {
        match token {
            Token::Text(text) => push_node(&mut stack, Node::Text(text.to_string())),
            Token::Comment(text) => push_node(&mut stack, Node::Comment(text.to_string())),
            Token::Open {
                name,
                attrs,
                self_closing,
            } => {
                let element = Element {
                    name: name.to_string(),
                    attrs,
                    children: Vec::new(),
                    self_closing,
                };
                if self_closing || is_void(name) {
                    push_node(&mut stack, Node::Element(element));
                } else {
                    stack.push((Some(element), Vec::new()));
                }
            }
            Token::Close {
                name,
            } => {
                let open_at = stack
                    .iter()
                    .rposition(|(el, _)| el.as_ref().is_some_and(|el| el.name == name))
                    .or_else(|| {
                        stack.iter().rposition(|(el, _)| {
                            el.as_ref().is_some_and(|el| el.name.eq_ignore_ascii_case(name))
                        })
                    });
                match open_at {
                    Some(index) => {
                        while stack.len() > index {
                            close_top(&mut stack);
                        }
                    }
                    None => tracing::trace!("dropping stray closing tag </{name}>"),
                }
            }
        }
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }
    Ok(stack.pop().map(|(_, nodes)| nodes).unwrap_or_default())
}

fn push_node(stack: &mut [(Option<Element>, Vec<Node>)], node: Node) {
    if let Some((_, children)) = stack.last_mut() {
        children.push(node);
    }
}

fn close_top(stack: &mut Vec<(Option<Element>, Vec<Node>)>) {
    if let Some((Some(mut element), children)) = stack.pop() {
        element.children = children;
        push_node(stack, Node::Element(element));
    }
}

/// Serialize a list of nodes back to markup.
#[must_use]
pub fn serialize_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            element.attrs.write_markup(out);
            if element.children.is_empty() && element.self_closing {
                out.push_str("/>");
                return;
            }
            out.push('>');
            if element.children.is_empty() && is_void(&element.name) {
                return;
            }
            for child in &element.children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
}

/// Every element named `name` at any depth, in document order.
pub fn find_all_by_tag_name<'a>(nodes: &'a [Node], name: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect_by_tag_name(nodes, name, &mut found);
    found
}

fn collect_by_tag_name<'a>(nodes: &'a [Node], name: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.name == name {
                found.push(element);
            }
            collect_by_tag_name(&element.children, name, found);
        }
    }
}

/// Visit every element named `name` in pre-order and let `visit` rewrite it.
///
/// Returning `false` from `visit` skips the element's (possibly replaced)
/// children; returning `true` descends into them.
pub fn for_each_by_tag_name_mut<F>(nodes: &mut [Node], name: &str, visit: &mut F)
where
    F: FnMut(&mut Element) -> bool,
{
    for node in nodes {
        if let Node::Element(element) = node {
            let descend = if element.name == name { visit(element) } else { true };
            if descend {
                for_each_by_tag_name_mut(&mut element.children, name, visit);
            }
        }
    }
}
