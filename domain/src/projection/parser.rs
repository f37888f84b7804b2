//! Recursive-descent parser for projection expressions.
//!
//! Grammar:
//!
//! ```text
//! expression := ws | list
//! list       := term ( ',' term )*
//! term       := path ( '(' list ')' )?
//! path       := name ( '/' name )*
//! name       := '*' | [^,()/]+        (surrounding whitespace ignored)
//! ```
//!
//! `a/b(c)` is shorthand for `a(b(c))`.

use super::{FieldName, FieldSelector, ProjectionError};

pub(super) struct Parser<'a> {
    expression: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(expression: &'a str) -> Self {
        Self {
            expression,
            chars: expression.char_indices().collect(),
            pos: 0,
        }
    }

    pub(super) fn parse(mut self) -> Result<Vec<FieldSelector>, ProjectionError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Ok(Vec::new());
        }
        self.parse_list(None)
    }

    /// Parse a comma-separated list. `open` is the offset of the enclosing
    /// `(` when nested.
    fn parse_list(&mut self, open: Option<usize>) -> Result<Vec<FieldSelector>, ProjectionError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                if let Some(offset) = open {
                    return Err(self.unbalanced(offset));
                }
            }
            selectors.push(self.parse_term(open)?);
            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some(')') if open.is_some() => return Ok(selectors),
                Some(')') => return Err(self.unbalanced(self.offset())),
                Some(found) => {
                    return Err(ProjectionError::UnexpectedCharacter {
                        expression: self.expression.to_string(),
                        offset: self.offset(),
                        found,
                    });
                }
                None => match open {
                    Some(offset) => return Err(self.unbalanced(offset)),
                    None => return Ok(selectors),
                },
            }
        }
    }

    fn parse_term(&mut self, open: Option<usize>) -> Result<FieldSelector, ProjectionError> {
        let mut path = vec![self.parse_name(open)?];
        while self.peek() == Some('/') {
            self.pos += 1;
            path.push(self.parse_name(open)?);
        }

        self.skip_whitespace();
        let children = if self.peek() == Some('(') {
            let paren = self.offset();
            self.pos += 1;
            let children = self.parse_list(Some(paren))?;
            // parse_list only returns Ok when positioned on the matching ')'
            self.pos += 1;
            Some(children)
        } else {
            None
        };

        // Fold the path from the innermost segment outward.
        let mut segments = path.into_iter().rev();
        let innermost = segments.next().unwrap_or(FieldName::Wildcard);
        let mut selector = match children {
            Some(children) => FieldSelector::WithChildren(innermost, children),
            None => FieldSelector::Field(innermost),
        };
        for name in segments {
            selector = FieldSelector::WithChildren(name, vec![selector]);
        }
        Ok(selector)
    }

    fn parse_name(&mut self, open: Option<usize>) -> Result<FieldName, ProjectionError> {
        self.skip_whitespace();
        let start = self.offset();
        let begin = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, ',' | '(' | ')' | '/') {
                break;
            }
            self.pos += 1;
        }

        let raw: String = self.chars[begin..self.pos].iter().map(|(_, c)| *c).collect();
        let name = raw.trim();
        if name.is_empty() {
            if self.peek().is_none() {
                if let Some(offset) = open {
                    return Err(self.unbalanced(offset));
                }
            }
            return Err(ProjectionError::EmptyFieldName {
                expression: self.expression.to_string(),
                offset: start,
            });
        }

        Ok(if name == "*" {
            FieldName::Wildcard
        } else {
            FieldName::Named(name.to_string())
        })
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    /// Byte offset of the current position.
    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|(i, _)| *i)
            .unwrap_or(self.expression.len())
    }

    fn unbalanced(&self, offset: usize) -> ProjectionError {
        ProjectionError::UnbalancedParenthesis {
            expression: self.expression.to_string(),
            offset,
        }
    }
}
