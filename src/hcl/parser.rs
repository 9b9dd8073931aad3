//! Recursive descent parser for the HCL subset used by bundle documents.
//!
//! `nom` recognizes the tokens (identifiers, strings, numbers, heredocs,
//! comments); nesting is handled by hand so that every key and value can be
//! tagged with its source position.
//!
//! Supported syntax:
//! - `key = value` attributes and `key "label" ... { ... }` blocks
//! - `key = { ... }` object attributes
//! - strings with `\n`, `\t`, `\r`, `\\`, `\"` escapes
//! - `<<EOF` and `<<-EOF` heredocs
//! - integers, floats, `true` / `false`, `[ ... ]` lists
//! - `#`, `//` and `/* */` comments; optional commas between items

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    character::complete::{char, digit1, line_ending, multispace1, not_line_ending, one_of, satisfy},
    combinator::{map, opt, recognize},
    multi::many0_count,
    sequence::{pair, tuple},
};
use thiserror::Error;

use crate::hcl::ast::{Item, Key, LineIndex, Literal, ObjectList, Pos, Value};

/// A syntax error with the position it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("At {pos}: {message}")]
pub struct ParseError {
    pub pos: Pos,
    pub message: String,
}

impl ParseError {
    fn at(parser: &Parser<'_>, rest: &str) -> Self {
        let pos = parser.pos(rest);
        let message = match rest.chars().next() {
            None => "unexpected end of input".to_string(),
            Some(_) => {
                let snippet: String = rest
                    .chars()
                    .take_while(|c| !c.is_whitespace())
                    .take(16)
                    .collect();
                if snippet.is_empty() {
                    "unexpected whitespace".to_string()
                } else {
                    format!("unexpected `{}`", snippet)
                }
            }
        };
        Self { pos, message }
    }
}

/// Parse a complete document into its root object list.
pub fn parse(source: &str) -> Result<ObjectList, ParseError> {
    let parser = Parser {
        source,
        lines: LineIndex::new(source),
    };
    match parser.body(source, None) {
        Ok((_, list)) => Ok(list),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(ParseError::at(&parser, e.input))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::at(&parser, "")),
    }
}

struct Parser<'s> {
    source: &'s str,
    lines: LineIndex<'s>,
}

impl<'s> Parser<'s> {
    fn pos(&self, input: &str) -> Pos {
        self.lines.pos(self.source.len() - input.len())
    }

    /// Items up to `close` (or end of input for the document root).
    fn body(&self, mut input: &'s str, close: Option<char>) -> IResult<&'s str, ObjectList> {
        let mut items = Vec::new();
        loop {
            let (rest, _) = sp(input)?;
            input = rest;
            if let Some(rest) = input.strip_prefix(',') {
                input = rest;
                continue;
            }

            let done = match close {
                Some(c) => input.starts_with(c),
                None => input.is_empty(),
            };
            if done {
                break;
            }

            let (rest, item) = self.item(input)?;
            items.push(item);
            input = rest;
        }
        Ok((input, ObjectList::new(items)))
    }

    fn item(&self, input: &'s str) -> IResult<&'s str, Item> {
        let (mut input, first) = self.key(input)?;
        let mut keys = vec![first];
        loop {
            let (rest, _) = sp(input)?;
            if let Some(rest) = rest.strip_prefix('=') {
                let (rest, _) = sp(rest)?;
                let (rest, value) = cut(self.value(rest))?;
                return Ok((rest, Item { keys, value }));
            }
            if rest.starts_with('{') {
                let (rest, value) = self.object(rest)?;
                return Ok((rest, Item { keys, value }));
            }
            let (rest, key) = cut(self.key(rest))?;
            keys.push(key);
            input = rest;
        }
    }

    fn key(&self, input: &'s str) -> IResult<&'s str, Key> {
        let pos = self.pos(input);
        let (rest, token) = alt((quoted_string, map(identifier, str::to_string)))(input)?;
        Ok((rest, Key::new(token, pos)))
    }

    fn value(&self, input: &'s str) -> IResult<&'s str, Value> {
        if input.starts_with('{') {
            return self.object(input);
        }
        if input.starts_with('[') {
            return self.list(input);
        }
        let pos = self.pos(input);
        let (rest, literal) = alt((
            heredoc,
            map(quoted_string, Literal::String),
            number,
            boolean,
        ))(input)?;
        Ok((rest, Value::Literal { pos, literal }))
    }

    fn object(&self, input: &'s str) -> IResult<&'s str, Value> {
        let pos = self.pos(input);
        let (input, _) = char('{')(input)?;
        let (input, list) = cut(self.body(input, Some('}')))?;
        let (input, _) = cut(char('}')(input))?;
        Ok((input, Value::Object { pos, list }))
    }

    fn list(&self, input: &'s str) -> IResult<&'s str, Value> {
        let pos = self.pos(input);
        let (mut input, _) = char('[')(input)?;
        let mut values = Vec::new();
        loop {
            let (rest, _) = sp(input)?;
            if let Some(rest) = rest.strip_prefix(']') {
                return Ok((rest, Value::List { pos, values }));
            }
            let (rest, value) = cut(self.value(rest))?;
            values.push(value);
            let (rest, _) = sp(rest)?;
            input = match rest.strip_prefix(',') {
                Some(rest) => rest,
                None if rest.starts_with(']') => rest,
                None => return Err(nom::Err::Failure(nom::error::Error::new(rest, nom::error::ErrorKind::Char))),
            };
        }
    }
}

/// Promote a recoverable error to a failure once a construct is committed.
fn cut<'a, T>(result: IResult<&'a str, T>) -> IResult<&'a str, T> {
    result.map_err(|e| match e {
        nom::Err::Error(e) => nom::Err::Failure(e),
        other => other,
    })
}

/// Skip whitespace and comments.
fn sp(input: &str) -> IResult<&str, ()> {
    map(
        many0_count(alt((
            map(multispace1, |_| ()),
            map(pair(alt((tag("#"), tag("//"))), not_line_ending), |_| ()),
            map(tuple((tag("/*"), take_until("*/"), tag("*/"))), |_| ()),
        ))),
        |_| (),
    )(input)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_'),
        take_while(is_ident_char),
    ))(input)
}

/// Parse a double-quoted string.
fn quoted_string(input: &str) -> IResult<&str, String> {
    let (input, _) = char('"')(input)?;
    let mut result = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&input[i + 1..], result)),
            '\\' => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, '"')) => result.push('"'),
                Some((_, other)) => {
                    result.push('\\');
                    result.push(other);
                }
                None => break,
            },
            '\n' => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    &input[i..],
                    nom::error::ErrorKind::Char,
                )));
            }
            other => result.push(other),
        }
    }
    Err(nom::Err::Failure(nom::error::Error::new(
        "",
        nom::error::ErrorKind::Eof,
    )))
}

/// Parse `<<MARKER` / `<<-MARKER` heredocs. The indented form strips the
/// common leading whitespace of the body lines.
fn heredoc(input: &str) -> IResult<&str, Literal> {
    let (input, _) = tag("<<")(input)?;
    let (input, indented) = opt(char('-'))(input)?;
    let (input, marker) = identifier(input)?;
    let (mut input, _) = line_ending(input)?;

    let mut lines = Vec::new();
    loop {
        if input.is_empty() {
            return Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Eof,
            )));
        }
        let (rest, line) = not_line_ending(input)?;
        let (rest, _) = opt(line_ending)(rest)?;
        input = rest;

        let candidate = if indented.is_some() { line.trim_start() } else { line };
        if candidate.trim_end() == marker {
            break;
        }
        lines.push(line);
    }

    if indented.is_some() {
        let indent = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
            .min()
            .unwrap_or(0);
        lines = lines.into_iter().map(|l| strip_indent(l, indent)).collect();
    }

    let mut content = lines.join("\n");
    if !lines.is_empty() {
        content.push('\n');
    }
    Ok((input, Literal::String(content)))
}

/// Drop up to `indent` leading whitespace characters from `line`.
fn strip_indent(line: &str, indent: usize) -> &str {
    let cut = line
        .char_indices()
        .take(indent)
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &line[cut..]
}

fn number(input: &str) -> IResult<&str, Literal> {
    let (rest, text) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)?;

    let literal = if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>().map(Literal::Float).map_err(|_| {
            nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Float))
        })?
    } else {
        text.parse::<i64>().map(Literal::Int).map_err(|_| {
            nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
        })?
    };
    Ok((rest, literal))
}

fn boolean(input: &str) -> IResult<&str, Literal> {
    let (rest, word) = alt((tag("true"), tag("false")))(input)?;
    // Ensure it's not just a prefix of a longer word.
    if rest.chars().next().is_some_and(is_ident_char) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((rest, Literal::Bool(word == "true")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: &Value) -> &Literal {
        value.as_literal().expect("literal")
    }

    #[test]
    fn test_attributes_and_blocks() {
        let doc = parse(
            r#"
            # comment
            name = "demo"
            policy "quota" "q1" {
              enabled = false // trailing
              count   = 42
              ratio   = 0.5
            }
            "#,
        )
        .unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(
            literal(doc.attribute("name").unwrap()),
            &Literal::String("demo".into())
        );

        let policy = &doc.items[1];
        let keys: Vec<_> = policy.keys.iter().map(|k| k.token.as_str()).collect();
        assert_eq!(keys, ["policy", "quota", "q1"]);

        let body = policy.as_object().unwrap();
        assert_eq!(literal(body.attribute("enabled").unwrap()), &Literal::Bool(false));
        assert_eq!(literal(body.attribute("count").unwrap()), &Literal::Int(42));
        assert_eq!(literal(body.attribute("ratio").unwrap()), &Literal::Float(0.5));
    }

    #[test]
    fn test_positions() {
        let doc = parse("a = 1\nblock \"x\" {\n  b = \"two\"\n}\n").unwrap();
        let block = &doc.items[1];
        assert_eq!(block.keys[0].pos.line, 2);
        assert_eq!(block.keys[1].pos.column, 7);
        assert_eq!(block.pos().to_string(), "2:11");

        let inner = block.as_object().unwrap().attribute("b").unwrap();
        assert_eq!(inner.pos().to_string(), "3:7");
    }

    #[test]
    fn test_lists_and_object_attributes() {
        let doc = parse(
            r#"
            urls = ["a.js", "b.js",]
            source = { value = "request", clear_payload = true }
            empty {}
            "#,
        )
        .unwrap();

        match doc.attribute("urls").unwrap() {
            Value::List { values, .. } => assert_eq!(values.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
        let source = doc.attribute("source").unwrap().as_object().unwrap();
        assert_eq!(source.len(), 2);
        assert!(doc.attribute("empty").unwrap().as_object().unwrap().is_empty());
    }

    #[test]
    fn test_heredoc() {
        let doc = parse("content = <<EOF\nline one\n  line two\nEOF\n").unwrap();
        assert_eq!(
            literal(doc.attribute("content").unwrap()),
            &Literal::String("line one\n  line two\n".into())
        );

        let doc = parse("content = <<-EOT\n    a\n      b\n    EOT\nnext = 1\n").unwrap();
        assert_eq!(
            literal(doc.attribute("content").unwrap()),
            &Literal::String("a\n  b\n".into())
        );
        assert!(doc.contains("next"));
    }

    #[test]
    fn test_heredoc_multibyte_indent() {
        let doc = parse("content = <<-EOF\n  a\n\u{3000}b\n EOF\n").unwrap();
        assert_eq!(
            literal(doc.attribute("content").unwrap()),
            &Literal::String(" a\nb\n".into())
        );

        let doc = parse(
            "policy \"script\" \"s\" {\n  content = <<-EOF\n\u{3000}\u{3000}x\n\u{3000}  y\n  EOF\n}\n",
        )
        .unwrap();
        let policies = doc.filter("policy");
        let body = policies.items[0].as_object().unwrap();
        assert_eq!(
            literal(body.attribute("content").unwrap()),
            &Literal::String("x\n y\n".into())
        );
    }

    #[test]
    fn test_large_document_positions() {
        let count = 20_000;
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("policy \"quota\" \"q{}\" {{\n  allow {{ count = {} }}\n}}\n", i, i));
        }

        let started = std::time::Instant::now();
        let doc = parse(&source).unwrap();
        let elapsed = started.elapsed();

        assert_eq!(doc.len(), count);
        let last = &doc.items[count - 1];
        assert_eq!(last.keys[0].pos.line, 3 * (count - 1) + 1);
        assert_eq!(last.keys[0].pos.column, 1);
        let allow = last.as_object().unwrap().filter("allow");
        let value = allow.items[0].as_object().unwrap().attribute("count").unwrap();
        assert_eq!(value.pos().line, 3 * (count - 1) + 2);
        assert_eq!(value.pos().column, 19);
        assert!(elapsed.as_secs() < 20, "parsing took {:?}", elapsed);
    }

    #[test]
    fn test_string_escapes() {
        let doc = parse(r#"v = "a\"b\n\\c""#).unwrap();
        assert_eq!(
            literal(doc.attribute("v").unwrap()),
            &Literal::String("a\"b\n\\c".into())
        );
    }

    #[test]
    fn test_booleans_are_not_prefixes() {
        assert!(parse("v = trueish").is_err());
        let doc = parse("v = true").unwrap();
        assert_eq!(literal(doc.attribute("v").unwrap()), &Literal::Bool(true));
    }

    #[test]
    fn test_syntax_error_position() {
        let err = parse("a = 1\nb = \n}").unwrap_err();
        assert_eq!(err.pos.line, 3);
        assert_eq!(err.pos.column, 1);
        assert!(err.to_string().starts_with("At 3:1:"));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("policy \"quota\" \"q\" {\n  count = 1\n").unwrap_err();
        assert_eq!(err.message, "unexpected end of input");
    }
}
