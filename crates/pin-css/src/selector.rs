//! Selector data model and parser.

use crate::SelectorError;

/// A parsed selector: one or more comma-separated complex selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

/// A chain of compound selectors joined by combinators, left to right
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

/// One compound selector plus its relation to the part on its left
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorPart {
    pub compound: Compound,
    /// None for the leftmost part
    pub combinator: Option<Combinator>,
}

/// Combinator relating a compound to the previous (left) one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// A compound selector: simple selectors that all apply to one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    pub tag: Option<String>,
    pub universal: bool,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
    pub pseudos: Vec<PseudoClass>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && !self.universal
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudos.is_empty()
    }
}

/// Attribute selector `[attr]`, `[attr=value]`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct AttrSelector {
    pub name: String,
    pub matcher: Option<AttrMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Includes(String),
    /// [attr|=value] - exact or prefix followed by a hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttrSelector {
    /// Check whether an attribute value matches this selector
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(val) = value else { return false };
        let Some(matcher) = &self.matcher else {
            // [attr] - existence only
            return true;
        };
        let val = if self.case_insensitive {
            val.to_ascii_lowercase()
        } else {
            val.to_string()
        };
        let norm = |s: &str| {
            if self.case_insensitive {
                s.to_ascii_lowercase()
            } else {
                s.to_string()
            }
        };
        match matcher {
            AttrMatcher::Exact(expected) => val == norm(expected),
            AttrMatcher::Includes(expected) => {
                let expected = norm(expected);
                val.split_whitespace().any(|w| w == expected)
            }
            AttrMatcher::DashMatch(expected) => {
                let expected = norm(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            AttrMatcher::Prefix(expected) => val.starts_with(&norm(expected)),
            AttrMatcher::Suffix(expected) => val.ends_with(&norm(expected)),
            AttrMatcher::Substring(expected) => val.contains(&norm(expected)),
        }
    }
}

/// Structural pseudo-classes
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    NthChild(Nth),
    NthLastChild(Nth),
    Empty,
    Root,
    Not(Box<SelectorList>),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nth {
    pub a: i32,
    pub b: i32,
}

impl Nth {
    /// "odd" (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// "even" (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// A fixed index (0n+b)
    pub fn index(b: i32) -> Self {
        Self { a: 0, b }
    }

    /// Parse "odd", "even", "3", "2n", "2n+1", "-n+3"
    pub fn parse(s: &str) -> Result<Self, SelectorError> {
        let s = s.trim().to_ascii_lowercase().replace(' ', "");
        match s.as_str() {
            "odd" => return Ok(Self::odd()),
            "even" => return Ok(Self::even()),
            _ => {}
        }
        if let Ok(b) = s.parse::<i32>() {
            return Ok(Self::index(b));
        }
        let err = || SelectorError::InvalidNth(s.clone());
        let n_pos = s.find('n').ok_or_else(err)?;
        let a_str = &s[..n_pos];
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse().map_err(|_| err())?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else {
            rest.parse().map_err(|_| err())?
        };
        Ok(Self { a, b })
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }
        let diff = n - self.b;
        if self.a > 0 {
            diff >= 0 && diff % self.a == 0
        } else {
            diff <= 0 && diff % self.a == 0
        }
    }
}

pub(crate) fn parse_list(selector: &str) -> Result<SelectorList, SelectorError> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(SelectorError::Empty);
    }
    let selectors = split_top_level(selector)?
        .into_iter()
        .map(parse_complex)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SelectorList { selectors })
}

/// Split a selector list on top-level commas
fn split_top_level(s: &str) -> Result<Vec<&str>, SelectorError> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            ',' if depth == 0 => {
                out.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 || quote.is_some() {
        return Err(SelectorError::UnbalancedBracket);
    }
    out.push(&s[start..]);
    Ok(out)
}

enum Token {
    Compound(String),
    Combinator(Combinator),
    Space,
}

fn tokenize(s: &str) -> Result<Vec<Token>, SelectorError> {
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;

    let mut flush = |buf: &mut String, tokens: &mut Vec<Token>| {
        if !buf.is_empty() {
            tokens.push(Token::Compound(std::mem::take(buf)));
        }
    };

    for ch in s.chars() {
        if let Some(q) = quote {
            buf.push(ch);
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                buf.push(ch);
            }
            '[' | '(' => {
                depth += 1;
                buf.push(ch);
            }
            ']' | ')' => {
                depth -= 1;
                buf.push(ch);
            }
            '>' | '+' | '~' if depth == 0 => {
                flush(&mut buf, &mut tokens);
                tokens.push(Token::Combinator(match ch {
                    '>' => Combinator::Child,
                    '+' => Combinator::AdjacentSibling,
                    _ => Combinator::GeneralSibling,
                }));
            }
            c if depth == 0 && c.is_whitespace() => {
                flush(&mut buf, &mut tokens);
                tokens.push(Token::Space);
            }
            c => buf.push(c),
        }
    }
    if depth != 0 || quote.is_some() {
        return Err(SelectorError::UnbalancedBracket);
    }
    flush(&mut buf, &mut tokens);
    Ok(tokens)
}

fn parse_complex(s: &str) -> Result<ComplexSelector, SelectorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SelectorError::Empty);
    }
    let mut parts: Vec<SelectorPart> = Vec::new();
    let mut pending: Option<Combinator> = None;
    let mut saw_space = false;

    for token in tokenize(s)? {
        match token {
            Token::Space => saw_space = true,
            Token::Combinator(c) => {
                if parts.is_empty() {
                    return Err(SelectorError::UnexpectedToken(s.to_string()));
                }
                pending = Some(c);
                saw_space = false;
            }
            Token::Compound(text) => {
                let combinator = if parts.is_empty() {
                    None
                } else {
                    Some(pending.take().unwrap_or(Combinator::Descendant))
                };
                if combinator == Some(Combinator::Descendant) && !saw_space {
                    // Two compounds with no separator cannot happen after
                    // tokenizing, but guard anyway.
                    return Err(SelectorError::UnexpectedToken(text));
                }
                parts.push(SelectorPart {
                    compound: parse_compound(&text)?,
                    combinator,
                });
                saw_space = false;
            }
        }
    }
    if pending.is_some() {
        return Err(SelectorError::TrailingCombinator);
    }
    if parts.is_empty() {
        return Err(SelectorError::Empty);
    }
    Ok(ComplexSelector { parts })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(s: &str, from: usize) -> (String, usize) {
    let rest = &s[from..];
    let end = rest
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    (rest[..end].to_string(), from + end)
}

fn parse_compound(token: &str) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let mut i = 0;

    if token.as_bytes().first() == Some(&b'*') {
        compound.universal = true;
        i = 1;
    } else {
        let (tag, next) = take_ident(token, 0);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
            i = next;
        }
    }

    while i < token.len() {
        let rest = &token[i..];
        if let Some(stripped) = rest.strip_prefix('#') {
            let (id, next) = take_ident(token, token.len() - stripped.len());
            if id.is_empty() {
                return Err(SelectorError::UnexpectedToken(token.to_string()));
            }
            compound.id = Some(id);
            i = next;
        } else if let Some(stripped) = rest.strip_prefix('.') {
            let (class, next) = take_ident(token, token.len() - stripped.len());
            if class.is_empty() {
                return Err(SelectorError::UnexpectedToken(token.to_string()));
            }
            compound.classes.push(class);
            i = next;
        } else if rest.starts_with('[') {
            let close = find_balanced(rest, '[', ']')?;
            compound.attrs.push(parse_attr(&rest[1..close])?);
            i += close + 1;
        } else if rest.starts_with(':') {
            let body = rest.trim_start_matches(':');
            // Pseudo-elements (::before and friends) have no meaning for
            // selection over a bare tree.
            if rest.starts_with("::") {
                return Err(SelectorError::UnsupportedPseudo(rest.to_string()));
            }
            let (name, next) = take_ident(token, token.len() - body.len());
            let after = &token[next..];
            let (arg, consumed) = if after.starts_with('(') {
                let close = find_balanced(after, '(', ')')?;
                (Some(&after[1..close]), close + 1)
            } else {
                (None, 0)
            };
            compound.pseudos.push(parse_pseudo(&name, arg)?);
            i = next + consumed;
        } else {
            return Err(SelectorError::UnexpectedToken(token.to_string()));
        }
    }

    if compound.is_empty() {
        return Err(SelectorError::Empty);
    }
    Ok(compound)
}

/// Offset of the bracket that closes the one opening at `s[0]`
fn find_balanced(s: &str, open: char, close: char) -> Result<usize, SelectorError> {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    for (i, ch) in s.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        if ch == '"' || ch == '\'' {
            quote = Some(ch);
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Ok(i);
            }
        }
    }
    Err(SelectorError::UnbalancedBracket)
}

fn parse_attr(body: &str) -> Result<AttrSelector, SelectorError> {
    let body = body.trim();
    let (name, next) = take_ident(body, 0);
    if name.is_empty() {
        return Err(SelectorError::UnexpectedToken(body.to_string()));
    }
    let rest = body[next..].trim();
    if rest.is_empty() {
        return Ok(AttrSelector {
            name,
            matcher: None,
            case_insensitive: false,
        });
    }

    let (op, value) = if let Some(v) = rest.strip_prefix("~=") {
        ('~', v)
    } else if let Some(v) = rest.strip_prefix("|=") {
        ('|', v)
    } else if let Some(v) = rest.strip_prefix("^=") {
        ('^', v)
    } else if let Some(v) = rest.strip_prefix("$=") {
        ('$', v)
    } else if let Some(v) = rest.strip_prefix("*=") {
        ('*', v)
    } else if let Some(v) = rest.strip_prefix('=') {
        ('=', v)
    } else {
        return Err(SelectorError::UnexpectedToken(body.to_string()));
    };

    let mut value = value.trim();
    let mut case_insensitive = false;
    if let Some(v) = value
        .strip_suffix('i')
        .or_else(|| value.strip_suffix('I'))
        .map(str::trim_end)
    {
        // The `i` flag only exists after a quoted value.
        if v.ends_with('"') || v.ends_with('\'') {
            case_insensitive = true;
            value = v;
        }
    }
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
        .to_string();

    let matcher = match op {
        '=' => AttrMatcher::Exact(value),
        '~' => AttrMatcher::Includes(value),
        '|' => AttrMatcher::DashMatch(value),
        '^' => AttrMatcher::Prefix(value),
        '$' => AttrMatcher::Suffix(value),
        _ => AttrMatcher::Substring(value),
    };
    Ok(AttrSelector {
        name,
        matcher: Some(matcher),
        case_insensitive,
    })
}

fn parse_pseudo(name: &str, arg: Option<&str>) -> Result<PseudoClass, SelectorError> {
    match (name, arg) {
        ("first-child", None) => Ok(PseudoClass::FirstChild),
        ("last-child", None) => Ok(PseudoClass::LastChild),
        ("only-child", None) => Ok(PseudoClass::OnlyChild),
        ("empty", None) => Ok(PseudoClass::Empty),
        ("root", None) => Ok(PseudoClass::Root),
        ("nth-child", Some(arg)) => Ok(PseudoClass::NthChild(Nth::parse(arg)?)),
        ("nth-last-child", Some(arg)) => Ok(PseudoClass::NthLastChild(Nth::parse(arg)?)),
        ("not", Some(arg)) => Ok(PseudoClass::Not(Box::new(parse_list(arg)?))),
        _ => Err(SelectorError::UnsupportedPseudo(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound_parts() {
        let list = parse_list("div#main.btn.active[href^='https']").unwrap();
        assert_eq!(list.selectors.len(), 1);
        let compound = &list.selectors[0].parts[0].compound;
        assert_eq!(compound.tag.as_deref(), Some("div"));
        assert_eq!(compound.id.as_deref(), Some("main"));
        assert_eq!(compound.classes, vec!["btn", "active"]);
        assert_eq!(compound.attrs.len(), 1);
    }

    #[test]
    fn test_parse_combinators() {
        let list = parse_list("ul > li a + span").unwrap();
        let parts = &list.selectors[0].parts;
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].combinator, None);
        assert_eq!(parts[1].combinator, Some(Combinator::Child));
        assert_eq!(parts[2].combinator, Some(Combinator::Descendant));
        assert_eq!(parts[3].combinator, Some(Combinator::AdjacentSibling));
    }

    #[test]
    fn test_parse_selector_list() {
        let list = parse_list("h1, h2 , .title").unwrap();
        assert_eq!(list.selectors.len(), 3);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_list(""), Err(SelectorError::Empty));
        assert_eq!(parse_list("   "), Err(SelectorError::Empty));
        assert!(parse_list("div >").is_err());
        assert!(parse_list("> div").is_err());
        assert!(parse_list("[href").is_err());
        assert!(parse_list("div::before").is_err());
        assert!(parse_list("div:hover").is_err());
    }

    #[test]
    fn test_nth_parse() {
        assert_eq!(Nth::parse("odd"), Ok(Nth::odd()));
        assert_eq!(Nth::parse("even"), Ok(Nth::even()));
        assert_eq!(Nth::parse("3"), Ok(Nth::index(3)));
        assert_eq!(Nth::parse("2n"), Ok(Nth { a: 2, b: 0 }));
        assert_eq!(Nth::parse("2n+1"), Ok(Nth { a: 2, b: 1 }));
        assert_eq!(Nth::parse("-n+3"), Ok(Nth { a: -1, b: 3 }));
        assert!(Nth::parse("foo").is_err());
    }

    #[test]
    fn test_nth_matches() {
        let odd = Nth::odd();
        assert!(odd.matches(1));
        assert!(!odd.matches(2));
        assert!(odd.matches(3));

        let at_most_three = Nth::parse("-n+3").unwrap();
        assert!(at_most_three.matches(1));
        assert!(at_most_three.matches(3));
        assert!(!at_most_three.matches(4));
    }

    #[test]
    fn test_attr_matchers() {
        let sel = AttrSelector {
            name: "class".into(),
            matcher: Some(AttrMatcher::Includes("btn".into())),
            case_insensitive: false,
        };
        assert!(sel.matches(Some("nav btn active")));
        assert!(!sel.matches(Some("btn-primary")));
        assert!(!sel.matches(None));

        let sel = AttrSelector {
            name: "lang".into(),
            matcher: Some(AttrMatcher::DashMatch("en".into())),
            case_insensitive: false,
        };
        assert!(sel.matches(Some("en")));
        assert!(sel.matches(Some("en-US")));
        assert!(!sel.matches(Some("enx")));
    }

    #[test]
    fn test_attr_case_insensitive_flag() {
        let list = parse_list("[type='TEXT' i]").unwrap();
        let attr = &list.selectors[0].parts[0].compound.attrs[0];
        assert!(attr.case_insensitive);
        assert!(attr.matches(Some("text")));
    }
}
