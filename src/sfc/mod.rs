//! Single-file component sections.
//!
//! A component source is a sequence of top-level blocks:
//!
//! ```text
//! <template extends="./Base.vue">...</template>
//! <script>...</script>
//! <style scoped>...</style>
//! <i18n lang="json">...</i18n>
//! ```
//!
//! [`split_into_sections`] turns that into a [`ComponentDescriptor`] without
//! touching section bodies: each [`Section::content`] is the exact text
//! between the opening and closing tag, so re-serializing a descriptor with
//! [`block_to_markup`] reproduces the block verbatim.

use std::ops::Range;

use crate::core::{InheritError, Result};
use crate::markup::Attributes;
use crate::markup::lexer::{LexError, Lexer, Token, find_closing_tag};

const TEMPLATE: &str = "template";
const SCRIPT: &str = "script";
const STYLE: &str = "style";

/// One top-level block of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Tag name of the block (`template`, `script`, `style`, or a custom name)
    pub kind: String,
    pub attrs: Attributes,
    pub content: String,
}

impl Section {
    pub fn new(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attrs: Attributes::new(),
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, Some(value.into()));
        self
    }
}

/// Parsed form of one component source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub template: Option<Section>,
    pub script: Option<Section>,
    pub styles: Vec<Section>,
    pub custom_blocks: Vec<Section>,
}

/// Split raw component source into its sections.
///
/// `origin` names the source in error messages (a file path, or `<input>`).
///
/// # Errors
///
/// [`InheritError::Parse`] when a block is never closed, a tag is malformed,
/// or the source has more than one `<template>` or `<script>` block.
pub fn split_into_sections(source: &str, origin: &str) -> Result<ComponentDescriptor> {
    let parse_error = |reason: String| InheritError::Parse {
        file: origin.to_string(),
        reason,
    };

    let mut descriptor = ComponentDescriptor::default();
    let mut lexer = Lexer::new(source);

    while let Some((token, span)) =
        lexer.next_token().map_err(|e| parse_error(e.describe(source)))?
    {
        let Token::Open {
            name,
            attrs,
            self_closing,
        } = token
        else {
            // Top-level text, comments and stray closing tags sit between blocks.
            continue;
        };

        let (content, block_end) = if self_closing {
            (0..0, span.end)
        } else {
            block_body(source, name, span.end)
                .map_err(|e| parse_error(e.describe(source)))?
                .ok_or_else(|| parse_error(format!("<{name}> block is never closed")))?
        };
        lexer.seek(block_end);

        let section = Section {
            kind: name.to_string(),
            attrs,
            content: source[content].to_string(),
        };
        match name {
            TEMPLATE => {
                if descriptor.template.replace(section).is_some() {
                    return Err(parse_error("more than one <template> block".into()));
                }
            }
            SCRIPT => {
                if descriptor.script.replace(section).is_some() {
                    return Err(parse_error("more than one <script> block".into()));
                }
            }
            STYLE => descriptor.styles.push(section),
            _ => descriptor.custom_blocks.push(section),
        }
    }

    Ok(descriptor)
}

/// Body range and end-of-closing-tag offset for a block whose opening tag
/// ends at `body_start`.
fn block_body(
    source: &str,
    name: &str,
    body_start: usize,
) -> std::result::Result<Option<(Range<usize>, usize)>, LexError> {
    if name == SCRIPT || name == STYLE {
        let body = find_closing_tag(source, body_start, name).and_then(|close| {
            let end = source[close..].find('>')? + close + 1;
            Some((body_start..close, end))
        });
        return Ok(body);
    }

    // Same-name elements nest inside templates and custom blocks.
    let mut lexer = Lexer::new(source);
    lexer.seek(body_start);
    let mut depth = 1usize;
    while let Some((token, span)) = lexer.next_token()? {
        match token {
            Token::Open {
                name: inner,
                self_closing: false,
                ..
            } if inner == name => depth += 1,
            Token::Close {
                name: inner,
            } if inner == name => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some((body_start..span.start, span.end)));
                }
            }
            _ => {}
        }
    }
    Ok(None)
}

/// Serialize one section as `<kind k="v" ...>content</kind>`.
///
/// Every attribute is written in `key="value"` form, bare attributes with an
/// empty value. An absent section serializes to nothing.
#[must_use]
pub fn block_to_markup(section: Option<&Section>) -> String {
    let Some(section) = section else {
        return String::new();
    };
    let mut out = String::with_capacity(section.content.len() + 32);
    out.push('<');
    out.push_str(&section.kind);
    section.attrs.write_markup_valued(&mut out);
    out.push('>');
    out.push_str(&section.content);
    out.push_str("</");
    out.push_str(&section.kind);
    out.push('>');
    out
}

/// Everything except the template, in output order: custom blocks (minus any
/// whose kind is in `skip_kinds`), then the script, then every style, joined
/// by newlines.
#[must_use]
pub fn descriptor_to_non_template_markup(
    descriptor: &ComponentDescriptor,
    skip_kinds: &[&str],
) -> String {
    descriptor
        .custom_blocks
        .iter()
        .filter(|block| !skip_kinds.contains(&block.kind.as_str()))
        .chain(descriptor.script.iter())
        .chain(descriptor.styles.iter())
        .map(|section| block_to_markup(Some(section)))
        .collect::<Vec<_>>()
        .join("\n")
}
