//! Tokenizer shared by the tree parser and the section splitter.
//!
//! Works on byte offsets into the original source so callers can slice raw
//! section content out of the input without re-serializing it.

use std::ops::Range;

use super::node::Attributes;

/// Elements whose body is raw text up to the matching closing tag.
pub(crate) const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

/// One lexical unit of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    Comment(&'a str),
    Open {
        name: &'a str,
        attrs: Attributes,
        self_closing: bool,
    },
    Close {
        name: &'a str,
    },
}

/// Lexer failure with the byte offset it happened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LexError {
    pub offset: usize,
    pub reason: String,
}

impl LexError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }

    /// Render as `reason at line:col` against the source it came from.
    pub fn describe(&self, source: &str) -> String {
        let before = &source[..self.offset.min(source.len())];
        let line = before.matches('\n').count() + 1;
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        format!("{} at line {line}, column {column}", self.reason)
    }
}

pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    raw_until: Option<&'a str>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            raw_until: None,
        }
    }

    /// Continue lexing from byte `offset`, which must be a token boundary.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset.min(self.src.len());
        self.raw_until = None;
    }

    /// Next token and its byte span, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<(Token<'a>, Range<usize>)>, LexError> {
        if self.pos >= self.src.len() {
            return Ok(None);
        }
        let start = self.pos;

        if let Some(name) = self.raw_until.take() {
            let end = find_closing_tag(self.src, self.pos, name).unwrap_or(self.src.len());
            if end > start {
                self.pos = end;
                return Ok(Some((Token::Text(&self.src[start..end]), start..end)));
            }
        }

        let src = self.src;
        let rest = &src[start..];
        if let Some(body) = rest.strip_prefix("<!--") {
            let close = body.find("-->").ok_or_else(|| LexError::new(start, "unterminated comment"))?;
            let end = start + 4 + close + 3;
            self.pos = end;
            return Ok(Some((Token::Comment(&body[..close]), start..end)));
        }

        if starts_tag(rest) {
            let token = self.lex_tag()?;
            if let Token::Open {
                name,
                self_closing: false,
                ..
            } = &token
                && RAW_TEXT_ELEMENTS.iter().any(|raw| raw.eq_ignore_ascii_case(name))
            {
                self.raw_until = Some(*name);
            }
            return Ok(Some((token, start..self.pos)));
        }

        let first = rest.chars().next().map_or(1, char::len_utf8);
        let end = next_tag_start(self.src, start + first).unwrap_or(self.src.len());
        self.pos = end;
        Ok(Some((Token::Text(&self.src[start..end]), start..end)))
    }

    fn lex_tag(&mut self) -> Result<Token<'a>, LexError> {
        let tag_start = self.pos;
        self.pos += 1;
        let closing = self.eat('/');
        let name = self.take_while(is_name_char);

        if closing {
            self.skip_whitespace();
            if !self.eat('>') {
                return Err(LexError::new(tag_start, format!("unterminated closing tag </{name}")));
            }
            return Ok(Token::Close {
                name,
            });
        }

        let mut attrs = Attributes::new();
        let src = self.src;
        loop {
            self.skip_whitespace();
            let rest = &src[self.pos..];
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok(Token::Open {
                    name,
                    attrs,
                    self_closing: true,
                });
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return Ok(Token::Open {
                    name,
                    attrs,
                    self_closing: false,
                });
            }
            if rest.is_empty() {
                return Err(LexError::new(tag_start, format!("unterminated tag <{name}")));
            }

            let attr_name = self.take_while(is_attr_name_char);
            if attr_name.is_empty() {
                // Lone '/' or stray quote inside a tag; skip it.
                self.pos += rest.chars().next().map_or(1, char::len_utf8);
                continue;
            }

            self.skip_whitespace();
            if self.eat('=') {
                self.skip_whitespace();
                let value = self.lex_attr_value(tag_start)?;
                attrs.insert(attr_name, Some(value.to_string()));
            } else {
                attrs.insert(attr_name, None);
            }
        }
    }

    fn lex_attr_value(&mut self, tag_start: usize) -> Result<&'a str, LexError> {
        let src = self.src;
        let rest = &src[self.pos..];
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &rest[1..];
                let close = body.find(quote).ok_or_else(|| {
                    LexError::new(tag_start, "unterminated attribute value")
                })?;
                self.pos += 1 + close + 1;
                Ok(&body[..close])
            }
            _ => Ok(self.take_while(|c| !c.is_whitespace() && c != '>')),
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.src[self.pos..].starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let src = self.src;
        let rest = &src[self.pos..];
        let len = rest.char_indices().find(|&(_, c)| !pred(c)).map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        &rest[..len]
    }
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '/' | '>' | '<' | '=' | '"' | '\'')
}

fn is_attr_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '/' | '>' | '=' | '"' | '\'')
}

/// Whether `s` begins an opening or closing tag.
fn starts_tag(s: &str) -> bool {
    let mut chars = s.chars();
    if chars.next() != Some('<') {
        return false;
    }
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

fn next_tag_start(src: &str, from: usize) -> Option<usize> {
    let mut offset = from;
    while let Some(i) = src[offset..].find('<') {
        let at = offset + i;
        if src[at..].starts_with("<!--") || starts_tag(&src[at..]) {
            return Some(at);
        }
        offset = at + 1;
    }
    None
}

/// Byte offset of the first `</name` (ASCII case-insensitive) at or after `from`.
pub(crate) fn find_closing_tag(src: &str, from: usize, name: &str) -> Option<usize> {
    let bytes = src.as_bytes();
    let needle_len = name.len() + 2;
    let mut offset = from;
    while let Some(i) = src[offset..].find("</") {
        let at = offset + i;
        if at + needle_len <= bytes.len()
            && bytes[at + 2..at + needle_len].eq_ignore_ascii_case(name.as_bytes())
            && bytes.get(at + needle_len).is_none_or(|b| !is_name_char(char::from(*b)))
        {
            return Some(at);
        }
        offset = at + 2;
    }
    None
}
