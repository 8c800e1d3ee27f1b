//! Parse tree definitions for the declaration language.
//!
//! A [`Declaration`] owns its five children directly, so the tree is a plain
//! ownership tree. [`ParseNode`] offers a uniform, borrowed view over the
//! nodes for walkers and renderers.

mod declarations;
mod types;

pub use declarations::*;
pub use types::*;

use serde::{Deserialize, Serialize};

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Root of the tree: every declaration that parsed, in source order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

/// Borrowed, tagged view of a parse tree node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ParseNode<'a> {
    Declaration(&'a Declaration),
    Type(&'a TypeSpec),
    Identifier(&'a Identifier),
    AssignmentOperator(&'a Marker),
    Literal(&'a Literal),
    Terminator(&'a Marker),
}

impl<'a> ParseNode<'a> {
    /// Grammar symbol shown when the tree is printed
    pub fn label(&self) -> &'static str {
        match self {
            ParseNode::Declaration(_) => "<declaration>",
            ParseNode::Type(_) => "<type>",
            ParseNode::Identifier(_) => "<identifier>",
            ParseNode::AssignmentOperator(_) => "<assignment_operator>",
            ParseNode::Literal(_) => "<value>",
            ParseNode::Terminator(_) => "<semicolon>",
        }
    }

    /// Source text of a leaf, `None` for interior nodes
    pub fn lexeme(&self) -> Option<&'a str> {
        match self {
            ParseNode::Declaration(_) => None,
            ParseNode::Type(ty) => Some(ty.name.keyword()),
            ParseNode::Identifier(ident) => Some(&ident.name),
            ParseNode::AssignmentOperator(marker) | ParseNode::Terminator(marker) => {
                Some(&marker.lexeme)
            }
            ParseNode::Literal(lit) => Some(&lit.lexeme),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseNode::Declaration(decl) => decl.span,
            ParseNode::Type(ty) => ty.span,
            ParseNode::Identifier(ident) => ident.span,
            ParseNode::AssignmentOperator(marker) | ParseNode::Terminator(marker) => marker.span,
            ParseNode::Literal(lit) => lit.span,
        }
    }

    /// Children in source order
    pub fn children(&self) -> Vec<ParseNode<'a>> {
        match self {
            ParseNode::Declaration(decl) => decl.children().to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, ParseNode::Declaration(_))
    }
}
