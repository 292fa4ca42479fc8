//! A small CSS selector engine.
//!
//! Supported grammar:
//!
//! ```text
//! list      := complex ( "," complex )*
//! complex   := compound ( combinator compound )*
//! combinator:= whitespace | ">"
//! compound  := ( tag | "*" )? ( "#" ident | "." ident | attribute )*
//! attribute := "[" ident ( "=" ( ident | quoted ) )? "]"
//! ```
//!
//! Pseudo-classes and the sibling combinators are rejected.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use thiserror::Error;

use formcheck_core::{application::ApplicationError, domain::NodeId, error::FormError};

/// Why a selector failed to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("unexpected '{found}' at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("expected {expected} at offset {offset}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },

    #[error("unsupported syntax '{syntax}'")]
    Unsupported { syntax: String },
}

impl SelectorError {
    pub fn into_form_error(self, selector: &str) -> FormError {
        ApplicationError::InvalidSelector {
            selector: selector.to_string(),
            reason: self.to_string(),
        }
        .into()
    }
}

/// Read access to an element tree, enough to match selectors.
pub trait SelectorContext {
    /// Lowercase tag name.
    fn tag(&self, node: NodeId) -> Option<&str>;

    /// Parent element; `None` at the top of the tree.
    fn parent_element(&self, node: NodeId) -> Option<NodeId>;

    fn element_id(&self, node: NodeId) -> Option<&str>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn attribute(&self, node: NodeId, name: &str) -> Option<Cow<'_, str>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeSelector {
    Exists(String),
    Equals(String, String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    fn matches<C: SelectorContext + ?Sized>(&self, ctx: &C, node: NodeId) -> bool {
        let Some(tag) = ctx.tag(node) else {
            return false;
        };
        if let Some(expected) = &self.tag {
            if expected != "*" && !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if ctx.element_id(node) != Some(expected.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| ctx.has_class(node, c)) {
            return false;
        }
        self.attributes.iter().all(|attr| match attr {
            AttributeSelector::Exists(name) => ctx.attribute(node, name).is_some(),
            AttributeSelector::Equals(name, value) => {
                ctx.attribute(node, name).as_deref() == Some(value.as_str())
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    /// Left to right.
    compounds: Vec<Compound>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

impl ComplexSelector {
    fn matches<C: SelectorContext + ?Sized>(&self, ctx: &C, node: NodeId) -> bool {
        self.matches_at(ctx, node, self.compounds.len() - 1)
    }

    fn matches_at<C: SelectorContext + ?Sized>(&self, ctx: &C, node: NodeId, idx: usize) -> bool {
        if !self.compounds[idx].matches(ctx, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match self.combinators[idx - 1] {
            Combinator::Child => ctx
                .parent_element(node)
                .is_some_and(|parent| self.matches_at(ctx, parent, idx - 1)),
            Combinator::Descendant => {
                let mut current = ctx.parent_element(node);
                while let Some(ancestor) = current {
                    if self.matches_at(ctx, ancestor, idx - 1) {
                        return true;
                    }
                    current = ctx.parent_element(ancestor);
                }
                false
            }
        }
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse_list()
    }

    /// `true` if any selector in the list matches `node`.
    pub fn matches<C: SelectorContext + ?Sized>(&self, ctx: &C, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(ctx, node))
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Parser ────────────────────────────────────────────────────────────────────

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |(i, _)| *i)
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {
            skipped = true;
        }
        skipped
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        if self.input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut selectors = vec![self.parse_complex()?];
        while self.chars.next_if(|(_, c)| *c == ',').is_some() {
            selectors.push(self.parse_complex()?);
        }

        match self.chars.peek() {
            None => Ok(SelectorList { selectors }),
            Some(&(offset, found)) => Err(SelectorError::Unexpected { found, offset }),
        }
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_whitespace();
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let next = self.chars.peek().copied();
            let combinator = match next {
                None | Some((_, ',')) => break,
                Some((_, '>')) => {
                    self.chars.next();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some((_, c @ ('+' | '~'))) => {
                    return Err(SelectorError::Unsupported {
                        syntax: c.to_string(),
                    });
                }
                Some(_) if had_space => Combinator::Descendant,
                Some((offset, found)) => return Err(SelectorError::Unexpected { found, offset }),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        if self.chars.next_if(|(_, c)| *c == '*').is_some() {
            compound.tag = Some("*".into());
        } else if self.chars.peek().is_some_and(|(_, c)| is_ident_char(*c)) {
            compound.tag = Some(self.parse_ident("tag name")?.to_ascii_lowercase());
        }

        while let Some(&(offset, c)) = self.chars.peek() {
            match c {
                '#' => {
                    self.chars.next();
                    compound.id = Some(self.parse_ident("id")?);
                }
                '.' => {
                    self.chars.next();
                    compound.classes.push(self.parse_ident("class name")?);
                }
                '[' => {
                    self.chars.next();
                    compound.attributes.push(self.parse_attribute()?);
                }
                ':' => {
                    return Err(SelectorError::Unsupported {
                        syntax: self.input[offset..].to_string(),
                    });
                }
                _ => break,
            }
        }

        if compound.is_empty() {
            let offset = self.offset();
            return Err(SelectorError::Expected {
                expected: "a compound selector",
                offset,
            });
        }
        Ok(compound)
    }

    fn parse_ident(&mut self, expected: &'static str) -> Result<String, SelectorError> {
        let mut ident = String::new();
        while let Some((_, c)) = self.chars.next_if(|(_, c)| is_ident_char(*c)) {
            ident.push(c);
        }
        if ident.is_empty() {
            let offset = self.offset();
            return Err(SelectorError::Expected { expected, offset });
        }
        Ok(ident)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.parse_ident("attribute name")?.to_ascii_lowercase();
        self.skip_whitespace();

        match self.chars.next() {
            Some((_, ']')) => Ok(AttributeSelector::Exists(name)),
            Some((_, '=')) => {
                self.skip_whitespace();
                let value = match self.chars.peek().copied() {
                    Some((_, quote @ ('"' | '\''))) => {
                        self.chars.next();
                        self.parse_quoted(quote)?
                    }
                    _ => self.parse_ident("attribute value")?,
                };
                self.skip_whitespace();
                match self.chars.next() {
                    Some((_, ']')) => Ok(AttributeSelector::Equals(name, value)),
                    Some((offset, found)) => Err(SelectorError::Unexpected { found, offset }),
                    None => Err(SelectorError::Expected {
                        expected: "']'",
                        offset: self.input.len(),
                    }),
                }
            }
            Some((_, op @ ('~' | '|' | '^' | '$' | '*'))) => Err(SelectorError::Unsupported {
                syntax: format!("{op}="),
            }),
            Some((offset, found)) => Err(SelectorError::Unexpected { found, offset }),
            None => Err(SelectorError::Expected {
                expected: "']'",
                offset: self.input.len(),
            }),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == quote {
                return Ok(value);
            }
            value.push(c);
        }
        Err(SelectorError::Expected {
            expected: "closing quote",
            offset: self.input.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// form.popup__form > label > input#name.popup__input[type=text]
    struct Tree {
        tags: Vec<&'static str>,
        parents: Vec<Option<usize>>,
        ids: HashMap<usize, &'static str>,
        classes: HashMap<usize, Vec<&'static str>>,
        attrs: HashMap<(usize, &'static str), &'static str>,
    }

    fn tree() -> Tree {
        Tree {
            tags: vec!["form", "label", "input", "button"],
            parents: vec![None, Some(0), Some(1), Some(0)],
            ids: HashMap::from([(2, "name")]),
            classes: HashMap::from([
                (0, vec!["popup__form"]),
                (2, vec!["popup__input", "popup__input_type_name"]),
                (3, vec!["popup__button"]),
            ]),
            attrs: HashMap::from([((2, "type"), "text"), ((2, "required"), "")]),
        }
    }

    impl SelectorContext for Tree {
        fn tag(&self, node: NodeId) -> Option<&str> {
            self.tags.get(node.index()).copied()
        }
        fn parent_element(&self, node: NodeId) -> Option<NodeId> {
            self.parents[node.index()].map(NodeId::new)
        }
        fn element_id(&self, node: NodeId) -> Option<&str> {
            self.ids.get(&node.index()).copied()
        }
        fn has_class(&self, node: NodeId, class: &str) -> bool {
            self.classes
                .get(&node.index())
                .is_some_and(|c| c.iter().any(|x| *x == class))
        }
        fn attribute(&self, node: NodeId, name: &str) -> Option<Cow<'_, str>> {
            self.attrs
                .iter()
                .find(|((n, k), _)| *n == node.index() && *k == name)
                .map(|(_, v)| Cow::Borrowed(*v))
        }
    }

    fn matches(selector: &str, node: usize) -> bool {
        SelectorList::parse(selector)
            .unwrap()
            .matches(&tree(), NodeId::new(node))
    }

    #[test]
    fn simple_selectors() {
        assert!(matches("input", 2));
        assert!(matches("INPUT", 2));
        assert!(matches(".popup__input", 2));
        assert!(matches("#name", 2));
        assert!(matches("*", 3));
        assert!(!matches(".popup__input", 3));
    }

    #[test]
    fn compound_selectors() {
        assert!(matches("input.popup__input.popup__input_type_name", 2));
        assert!(!matches("button.popup__input", 2));
        assert!(matches("input[type=text][required]", 2));
        assert!(matches("input[type=\"text\"]", 2));
        assert!(!matches("input[type='email']", 2));
    }

    #[test]
    fn combinators() {
        assert!(matches(".popup__form input", 2));
        assert!(matches(".popup__form > label > input", 2));
        assert!(!matches(".popup__form > input", 2));
        assert!(matches("form  >  .popup__button", 3));
    }

    #[test]
    fn selector_lists() {
        assert!(matches("textarea, .popup__input", 2));
        assert!(matches("textarea,button", 3));
    }

    #[test]
    fn rejects_malformed_selectors() {
        assert_eq!(SelectorList::parse("  "), Err(SelectorError::Empty));
        assert!(SelectorList::parse(".").is_err());
        assert!(SelectorList::parse("input[type").is_err());
        assert!(SelectorList::parse("a,").is_err());
        assert!(matches!(
            SelectorList::parse("input:invalid"),
            Err(SelectorError::Unsupported { .. })
        ));
        assert!(matches!(
            SelectorList::parse("label + input"),
            Err(SelectorError::Unsupported { .. })
        ));
    }

    #[test]
    fn errors_convert_to_invalid_selector() {
        let err = SelectorList::parse("#").unwrap_err().into_form_error("#");
        assert!(err.to_string().contains("Invalid selector '#'"));
    }
}
