use std::fmt;

/// One attribute test inside a compound selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrTest {
    pub name: String,
    pub op: AttrOp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr]`
    Exists,
    /// `[attr="v"]`
    Equals(String),
    /// `[attr*="v"]`
    Contains(String),
}

/// A single compound: element name plus any number of simple tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub element: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrTest>,
    pub first_child: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// A parsed selector chain, matched right-to-left by the matcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    pub(crate) parts: Vec<CompoundSelector>,
    /// Between consecutive parts; always `parts.len() - 1` entries.
    pub(crate) combinators: Vec<Combinator>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnexpectedChar(char),
    DanglingCombinator,
    UnterminatedAttr,
    EmptyAttrName,
    EmptyPart,
    UnknownPseudo(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty selector"),
            ParseError::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            ParseError::DanglingCombinator => write!(f, "combinator without a compound on both sides"),
            ParseError::UnterminatedAttr => write!(f, "unterminated attribute test"),
            ParseError::EmptyAttrName => write!(f, "attribute test without a name"),
            ParseError::EmptyPart => write!(f, "selector part without a name"),
            ParseError::UnknownPseudo(p) => write!(f, "unsupported pseudo-class :{p}"),
        }
    }
}

impl Selector {
    pub fn parse(input: &str) -> Result<Selector, ParseError> {
        let mut parts = Vec::new();
        let mut combinators = Vec::new();
        let mut pending_child = false;

        for token in split_chain(input)? {
            match token {
                Token::Compound(raw) => {
                    if !parts.is_empty() {
                        combinators.push(if pending_child {
                            Combinator::Child
                        } else {
                            Combinator::Descendant
                        });
                    }
                    parts.push(parse_compound(raw)?);
                    pending_child = false;
                }
                Token::Child => {
                    if parts.is_empty() || pending_child {
                        return Err(ParseError::DanglingCombinator);
                    }
                    pending_child = true;
                }
            }
        }

        if pending_child {
            return Err(ParseError::DanglingCombinator);
        }
        if parts.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(Selector { parts, combinators })
    }
}

enum Token<'a> {
    Compound(&'a str),
    Child,
}

// Top-level split on whitespace and '>', leaving bracketed attribute tests
// (which may contain both) intact.
fn split_chain(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    fn flush<'a>(
        input: &'a str,
        tokens: &mut Vec<Token<'a>>,
        start: &mut Option<usize>,
        end: usize,
    ) {
        if let Some(s) = start.take() {
            tokens.push(Token::Compound(&input[s..end]));
        }
    }

    let mut tokens = Vec::new();
    let mut depth = 0u32;
    let mut quote: Option<char> = None;
    let mut start: Option<usize> = None;

    for (i, ch) in input.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if depth > 0 => quote = Some(ch),
            '[' => {
                depth += 1;
                if start.is_none() {
                    start = Some(i);
                }
            }
            ']' => {
                if depth == 0 {
                    return Err(ParseError::UnexpectedChar(']'));
                }
                depth -= 1;
            }
            '>' if depth == 0 => {
                flush(input, &mut tokens, &mut start, i);
                tokens.push(Token::Child);
            }
            c if c.is_whitespace() && depth == 0 => flush(input, &mut tokens, &mut start, i),
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if depth > 0 || quote.is_some() {
        return Err(ParseError::UnterminatedAttr);
    }
    flush(input, &mut tokens, &mut start, input.len());
    Ok(tokens)
}

fn ident_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len())
}

fn parse_compound(raw: &str) -> Result<CompoundSelector, ParseError> {
    let mut sel = CompoundSelector::default();
    let mut rest = raw;
    let mut saw_part = false;

    if let Some(tail) = rest.strip_prefix('*') {
        rest = tail;
        saw_part = true;
    } else {
        let len = ident_len(rest);
        if len > 0 {
            sel.element = Some(rest[..len].to_ascii_lowercase());
            rest = &rest[len..];
            saw_part = true;
        }
    }

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('#') {
            let len = ident_len(tail);
            if len == 0 {
                return Err(ParseError::EmptyPart);
            }
            sel.id = Some(tail[..len].to_string());
            rest = &tail[len..];
        } else if let Some(tail) = rest.strip_prefix('.') {
            let len = ident_len(tail);
            if len == 0 {
                return Err(ParseError::EmptyPart);
            }
            sel.classes.push(tail[..len].to_string());
            rest = &tail[len..];
        } else if let Some(tail) = rest.strip_prefix(':') {
            let len = ident_len(tail);
            let name = &tail[..len];
            if !name.eq_ignore_ascii_case("first-child") {
                return Err(ParseError::UnknownPseudo(name.to_string()));
            }
            sel.first_child = true;
            rest = &tail[len..];
        } else if let Some(tail) = rest.strip_prefix('[') {
            let end = tail.find(']').ok_or(ParseError::UnterminatedAttr)?;
            sel.attrs.push(parse_attr(&tail[..end])?);
            rest = &tail[end + 1..];
        } else {
            let c = rest.chars().next().unwrap_or(' ');
            return Err(ParseError::UnexpectedChar(c));
        }
        saw_part = true;
    }

    if !saw_part {
        return Err(ParseError::EmptyPart);
    }
    Ok(sel)
}

fn parse_attr(body: &str) -> Result<AttrTest, ParseError> {
    let body = body.trim();
    let name_len = ident_len(body);
    if name_len == 0 {
        return Err(ParseError::EmptyAttrName);
    }
    let name = body[..name_len].to_ascii_lowercase();
    let rest = body[name_len..].trim_start();

    if rest.is_empty() {
        return Ok(AttrTest {
            name,
            op: AttrOp::Exists,
        });
    }
    if let Some(value) = rest.strip_prefix("*=") {
        return Ok(AttrTest {
            name,
            op: AttrOp::Contains(unquote(value)?),
        });
    }
    if let Some(value) = rest.strip_prefix('=') {
        return Ok(AttrTest {
            name,
            op: AttrOp::Equals(unquote(value)?),
        });
    }
    Err(ParseError::UnexpectedChar(rest.chars().next().unwrap_or(' ')))
}

fn unquote(value: &str) -> Result<String, ParseError> {
    let value = value.trim();
    for q in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(q) {
            let inner = inner.strip_suffix(q).ok_or(ParseError::UnterminatedAttr)?;
            return Ok(inner.to_string());
        }
    }
    Ok(value.to_string())
}
