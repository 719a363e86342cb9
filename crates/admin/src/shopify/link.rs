//! `Link` header parsing (RFC 8288).
//!
//! Shopify paginates REST listings with headers like:
//!
//! ```text
//! <https://shop.myshopify.com/admin/api/2024-01/products.json?limit=250&page_info=abc>; rel="previous",
//! <https://shop.myshopify.com/admin/api/2024-01/products.json?limit=250&page_info=def>; rel="next"
//! ```
//!
//! [`LinkHeader::parse`] turns the header into a relation -> target map.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors that can occur when parsing a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkHeaderError {
    /// A link value did not start with `<`.
    #[error("expected '<' at byte {0}")]
    ExpectedTarget(usize),

    /// A `<` was never closed by `>`.
    #[error("unterminated link target starting at byte {0}")]
    UnterminatedTarget(usize),

    /// A quoted parameter value was never closed.
    #[error("unterminated quoted parameter starting at byte {0}")]
    UnterminatedQuote(usize),
}

/// Parsed `Link` header: relation type to target URI.
///
/// Relation types are compared case-insensitively and stored lowercase. A
/// link whose `rel` lists several types (`rel="next last"`) is registered
/// under each. When a relation repeats, the first link wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkHeader {
    links: BTreeMap<String, String>,
}

impl LinkHeader {
    /// Parse a header value.
    ///
    /// # Errors
    ///
    /// Returns `LinkHeaderError` if the value is not a comma-separated list of
    /// `<target>; param=value` entries.
    pub fn parse(value: &str) -> Result<Self, LinkHeaderError> {
        let mut scanner = Scanner::new(value);
        let mut links = BTreeMap::new();

        loop {
            scanner.skip_while(|b| b == b',' || b.is_ascii_whitespace());
            if scanner.is_done() {
                break;
            }

            let target = scanner.target()?;
            let mut rels: Option<String> = None;

            loop {
                scanner.skip_whitespace();
                match scanner.peek() {
                    Some(b';') => scanner.bump(),
                    _ => break,
                }
                let (name, param) = scanner.param()?;
                if rels.is_none() && name.eq_ignore_ascii_case("rel") {
                    rels = param;
                }
            }

            for rel in rels.iter().flat_map(|r| r.split_ascii_whitespace()) {
                links
                    .entry(rel.to_ascii_lowercase())
                    .or_insert_with(|| target.to_string());
            }
        }

        Ok(Self { links })
    }

    /// Target of the given relation, if present.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.links.get(&rel.to_ascii_lowercase()).map(String::as_str)
    }

    /// Target of the `next` relation, if present.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }
}

/// Byte-level scanner. All delimiters are ASCII, so slicing at their
/// positions always lands on UTF-8 boundaries.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    fn skip_whitespace(&mut self) {
        self.skip_while(|b| b.is_ascii_whitespace());
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        self.skip_while(pred);
        input.get(start..self.pos).unwrap_or_default()
    }

    /// `<uri-reference>`
    fn target(&mut self) -> Result<&'a str, LinkHeaderError> {
        let start = self.pos;
        if self.peek() != Some(b'<') {
            return Err(LinkHeaderError::ExpectedTarget(start));
        }
        self.bump();
        let target = self.take_while(|b| b != b'>');
        if self.peek() != Some(b'>') {
            return Err(LinkHeaderError::UnterminatedTarget(start));
        }
        self.bump();
        Ok(target.trim())
    }

    /// `name[=value]` where value is a token or a quoted string.
    fn param(&mut self) -> Result<(&'a str, Option<String>), LinkHeaderError> {
        self.skip_whitespace();
        let name = self
            .take_while(|b| !matches!(b, b'=' | b';' | b',') && !b.is_ascii_whitespace());
        self.skip_whitespace();

        if self.peek() != Some(b'=') {
            return Ok((name, None));
        }
        self.bump();
        self.skip_whitespace();

        if self.peek() == Some(b'"') {
            return self.quoted().map(|value| (name, Some(value)));
        }
        let value = self.take_while(|b| !matches!(b, b';' | b',') && !b.is_ascii_whitespace());
        Ok((name, Some(value.to_string())))
    }

    fn quoted(&mut self) -> Result<String, LinkHeaderError> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            let chunk = self.take_while(|b| b != b'"' && b != b'\\');
            value.push_str(chunk);
            match self.peek() {
                Some(b'"') => {
                    self.bump();
                    return Ok(value);
                }
                Some(b'\\') => {
                    self.bump();
                    let escaped = self
                        .input
                        .get(self.pos..)
                        .and_then(|rest| rest.chars().next())
                        .ok_or(LinkHeaderError::UnterminatedQuote(start))?;
                    value.push(escaped);
                    self.pos += escaped.len_utf8();
                }
                _ => return Err(LinkHeaderError::UnterminatedQuote(start)),
            }
        }
    }
}
