//! Markup text → [`Element`] tree.

use crate::error::{MarkupError, MarkupResult};

use super::Element;

impl Element {
    /// Parse markup text into an element tree.
    ///
    /// Accepts an optional `<?xml ...?>` prolog and comments around the root
    /// element. Fails with [`MarkupError::Malformed`] on anything that is not
    /// well-formed: unclosed or mismatched tags, stray text content, duplicate
    /// attributes, bad entities, or trailing content after the root.
    pub fn parse(input: &str) -> MarkupResult<Element> {
        let mut reader = Reader::new(input);
        reader.parse_document()
    }
}

/// Markup reader over the raw input, one element tree per document.
struct Reader {
    input: Vec<char>,
    position: usize,
}

impl Reader {
    fn new(input: &str) -> Self {
        Reader { input: input.chars().collect(), position: 0 }
    }

    fn parse_document(&mut self) -> MarkupResult<Element> {
        self.skip_misc()?;
        if self.is_eof() {
            return Err(self.error("expected an element"));
        }
        let root = self.parse_element()?;
        self.skip_misc()?;
        if !self.is_eof() {
            return Err(self.error("content after the root element"));
        }
        Ok(root)
    }

    /// Parse one element starting at `<`.
    fn parse_element(&mut self) -> MarkupResult<Element> {
        self.expect('<')?;
        let tag = self.parse_name()?;
        let mut element = Element::new(tag);

        loop {
            self.skip_whitespace();
            match self.current()? {
                '/' => {
                    self.advance();
                    self.expect('>')?;
                    return Ok(element);
                }
                '>' => {
                    self.advance();
                    self.parse_children(&mut element)?;
                    return Ok(element);
                }
                _ => {
                    let (name, value) = self.parse_attribute()?;
                    if element.attribute(&name).is_some() {
                        return Err(self.error(format!("duplicate attribute {name:?}")));
                    }
                    element.set_attribute(name, value);
                }
            }
        }
    }

    /// Parse child elements up to and including the matching closing tag.
    fn parse_children(&mut self, element: &mut Element) -> MarkupResult<()> {
        loop {
            self.skip_whitespace();
            if self.is_eof() {
                return Err(self.error(format!("unclosed element <{}>", element.tag())));
            }
            if self.starts_with("<!--") {
                self.skip_comment()?;
            } else if self.starts_with("</") {
                self.position += 2;
                let closing = self.parse_name()?;
                if closing != element.tag() {
                    return Err(self.error(format!(
                        "mismatched closing tag: expected </{}>, found </{closing}>",
                        element.tag()
                    )));
                }
                self.skip_whitespace();
                self.expect('>')?;
                return Ok(());
            } else if self.current()? == '<' {
                let child = self.parse_element()?;
                element.push_child(child);
            } else {
                return Err(self.error("unexpected text content"));
            }
        }
    }

    fn parse_attribute(&mut self) -> MarkupResult<(String, String)> {
        let name = self.parse_name()?;
        self.skip_whitespace();
        self.expect('=')?;
        self.skip_whitespace();
        let quote = self.current()?;
        if quote != '"' && quote != '\'' {
            return Err(self.error("attribute value must be quoted"));
        }
        self.advance();

        let mut value = String::new();
        loop {
            let ch = self.current()?;
            if ch == quote {
                self.advance();
                return Ok((name, value));
            }
            match ch {
                '<' => return Err(self.error("'<' is not allowed in an attribute value")),
                '&' => value.push(self.parse_entity()?),
                _ => {
                    value.push(ch);
                    self.advance();
                }
            }
        }
    }

    /// Decode an entity reference starting at `&`.
    fn parse_entity(&mut self) -> MarkupResult<char> {
        let start = self.position;
        self.advance();
        let mut name = String::new();
        loop {
            let ch = self.current()?;
            self.advance();
            if ch == ';' {
                break;
            }
            name.push(ch);
            if name.len() > 8 {
                return Err(self.error_at(start, "entity reference is not terminated"));
            }
        }
        match name.as_str() {
            "amp" => Ok('&'),
            "lt" => Ok('<'),
            "gt" => Ok('>'),
            "quot" => Ok('"'),
            "apos" => Ok('\''),
            _ => {
                let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => name.strip_prefix('#').and_then(|dec| dec.parse().ok()),
                };
                code.and_then(char::from_u32)
                    .ok_or_else(|| self.error_at(start, format!("unknown entity &{name};")))
            }
        }
    }

    /// Parse a tag or attribute name.
    fn parse_name(&mut self) -> MarkupResult<String> {
        let first = self.current()?;
        if !first.is_alphabetic() && first != '_' {
            return Err(self.error("expected a name"));
        }
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | ':') {
                name.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Ok(name)
    }

    /// Skip whitespace, an optional prolog, and comments before or after the
    /// root element.
    fn skip_misc(&mut self) -> MarkupResult<()> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<?") {
                self.skip_until("?>")?;
            } else if self.starts_with("<!--") {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_comment(&mut self) -> MarkupResult<()> {
        self.position += "<!--".len();
        let start = self.position;
        loop {
            if self.is_eof() {
                return Err(self.error_at(start, "unterminated comment"));
            }
            if self.starts_with("-->") {
                self.position += "-->".len();
                return Ok(());
            }
            self.advance();
        }
    }

    fn skip_until(&mut self, end: &str) -> MarkupResult<()> {
        let start = self.position;
        loop {
            if self.is_eof() {
                return Err(self.error_at(start, format!("expected {end:?} before end of input")));
            }
            if self.starts_with(end) {
                self.position += end.chars().count();
                return Ok(());
            }
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn expect(&mut self, expected: char) -> MarkupResult<()> {
        let found = self.current()?;
        if found != expected {
            return Err(self.error(format!("expected {expected:?}, found {found:?}")));
        }
        self.advance();
        Ok(())
    }

    /// Current character, or an error at end of input.
    fn current(&self) -> MarkupResult<char> {
        self.peek().ok_or_else(|| self.error("unexpected end of input"))
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(offset, ch)| self.input.get(self.position + offset) == Some(&ch))
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn error(&self, reason: impl Into<String>) -> MarkupError {
        self.error_at(self.position, reason)
    }

    fn error_at(&self, position: usize, reason: impl Into<String>) -> MarkupError {
        MarkupError::malformed(position, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_with_attributes() {
        let text = "<departmentList><department name=\"department1\"><department \
                    name=\"department2\"><department name=\"department3\" \
                    /></department></department></departmentList>";
        let root = Element::parse(text).unwrap();
        assert_eq!(root.tag(), "departmentList");
        assert_eq!(root.children().len(), 1);

        let level1 = &root.children()[0];
        assert_eq!(level1.attribute("name"), Some("department1"));
        let level2 = &level1.children()[0];
        assert_eq!(level2.attribute("name"), Some("department2"));
        let level3 = &level2.children()[0];
        assert_eq!(level3.attribute("name"), Some("department3"));
        assert!(level3.children().is_empty());
    }

    #[test]
    fn parses_empty_container() {
        let root = Element::parse("<departmentList/>").unwrap();
        assert_eq!(root.tag(), "departmentList");
        assert!(root.children().is_empty());
    }

    #[test]
    fn accepts_prolog_comments_and_single_quotes() {
        let text = "<?xml version=\"1.0\"?>\n<!-- exported -->\n\
                    <list>\n  <item name='a&amp;b'/>\n</list>";
        let root = Element::parse(text).unwrap();
        assert_eq!(root.children()[0].attribute("name"), Some("a&b"));
    }

    #[test]
    fn decodes_numeric_character_references() {
        let root = Element::parse("<n v=\"&#65;&#x42;\"/>").unwrap();
        assert_eq!(root.attribute("v"), Some("AB"));
    }

    #[test]
    fn rejects_unclosed_tag() {
        let err = Element::parse("<departmentList><department name=\"d1\">").unwrap_err();
        assert!(matches!(err, MarkupError::Malformed { .. }));
    }

    #[test]
    fn rejects_mismatched_closing_tag() {
        let err = Element::parse("<a><b></a></b>").unwrap_err();
        let MarkupError::Malformed { reason, .. } = err else {
            panic!("expected a malformed error");
        };
        assert!(reason.contains("</b>"), "unexpected reason: {reason}");
    }

    #[test]
    fn rejects_text_content() {
        let err = Element::parse("<a>text</a>").unwrap_err();
        assert!(matches!(err, MarkupError::Malformed { .. }));
    }

    #[test]
    fn rejects_trailing_content() {
        let err = Element::parse("<a/><b/>").unwrap_err();
        let MarkupError::Malformed { reason, .. } = err else {
            panic!("expected a malformed error");
        };
        assert!(reason.contains("after the root"), "unexpected reason: {reason}");
    }

    #[test]
    fn rejects_duplicate_attribute() {
        let err = Element::parse("<a name=\"x\" name=\"y\"/>").unwrap_err();
        assert!(matches!(err, MarkupError::Malformed { .. }));
    }

    #[test]
    fn rejects_unknown_entity() {
        let err = Element::parse("<a v=\"&nope;\"/>").unwrap_err();
        assert!(matches!(err, MarkupError::Malformed { .. }));
    }

    #[test]
    fn rejects_unquoted_attribute_value() {
        let err = Element::parse("<a name=x/>").unwrap_err();
        assert!(matches!(err, MarkupError::Malformed { .. }));
    }

    #[test]
    fn rejects_empty_input() {
        let err = Element::parse("   ").unwrap_err();
        assert!(matches!(err, MarkupError::Malformed { .. }));
    }

    #[test]
    fn error_position_points_into_the_input() {
        let input = "<a><b></c></a>";
        let MarkupError::Malformed { position, .. } = Element::parse(input).unwrap_err() else {
            panic!("expected a malformed error");
        };
        assert!(position <= input.len());
        assert!(position > 0);
    }
}
