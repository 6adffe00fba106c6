//! Pin CSS - selector parsing and matching.
//!
//! Implements the selector subset the Pin collection API relies on: type,
//! id, class, attribute and universal simple selectors, compound selectors,
//! the four combinators, selector lists, and the structural pseudo-classes.

mod matcher;
mod selector;

pub use matcher::{matches, query};
pub use selector::{
    AttrMatcher, AttrSelector, Combinator, ComplexSelector, Compound, Nth, PseudoClass,
    SelectorList, SelectorPart,
};

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected input in selector: {0:?}")]
    UnexpectedToken(String),
    #[error("unbalanced bracket in selector")]
    UnbalancedBracket,
    #[error("unsupported pseudo-class: {0}")]
    UnsupportedPseudo(String),
    #[error("invalid An+B expression: {0:?}")]
    InvalidNth(String),
    #[error("selector ends with a combinator")]
    TrailingCombinator,
}

/// Parse a selector string into a selector list
pub fn parse(selector: &str) -> Result<SelectorList, SelectorError> {
    selector::parse_list(selector)
}
