//! Template parser.
//!
//! Splits the source into literal text and `{{ ... }}` actions, then lexes
//! each action into a [`Pipeline`].

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::TemplateError;

use super::ast::{Command, Node, Pipeline, Term};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Pipe,
    Field(String),
    Ident(String),
    Text(String),
}

pub(crate) fn parse(source: &str) -> Result<Vec<Node>, TemplateError> {
    let mut nodes = Vec::new();
    let mut rest = source;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            nodes.push(Node::Literal(rest[..open].to_string()));
        }

        let body = &rest[open + 2..];
        let (tokens, consumed) = lex_action(source, body)?;
        nodes.push(Node::Action(parse_pipeline(source, tokens)?));
        rest = &body[consumed..];
    }

    if !rest.is_empty() {
        nodes.push(Node::Literal(rest.to_string()));
    }

    Ok(nodes)
}

fn parse_pipeline(source: &str, tokens: Vec<Token>) -> Result<Pipeline, TemplateError> {
    if tokens.is_empty() {
        return Err(error(source, "empty action"));
    }

    let mut commands = Vec::new();
    for group in tokens.split(|token| *token == Token::Pipe) {
        let (head, args) = group
            .split_first()
            .ok_or_else(|| error(source, "missing command in pipeline"))?;

        let command = match head {
            Token::Ident(function) => Command::Call {
                function: function.clone(),
                args: args
                    .iter()
                    .map(|token| term(source, token))
                    .collect::<Result<_, _>>()?,
            },
            token => {
                if !args.is_empty() {
                    return Err(error(source, "unexpected argument after value"));
                }
                if !commands.is_empty() {
                    return Err(error(source, "cannot pipe into a value"));
                }
                Command::Value(term(source, token)?)
            }
        };
        commands.push(command);
    }

    Ok(Pipeline { commands })
}

fn term(source: &str, token: &Token) -> Result<Term, TemplateError> {
    match token {
        Token::Field(name) => Ok(Term::Variable(name.clone())),
        Token::Text(text) => Ok(Term::Text(text.clone())),
        Token::Ident(name) => Err(error(
            source,
            &format!("function {name:?} used as an argument"),
        )),
        Token::Pipe => Err(error(source, "unexpected '|'")),
    }
}

/// Lex one action body. Returns the tokens and the number of bytes consumed,
/// closing `}}` included.
fn lex_action(source: &str, body: &str) -> Result<(Vec<Token>, usize), TemplateError> {
    let mut tokens = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        match c {
            '}' if body[index..].starts_with("}}") => return Ok((tokens, index + 2)),
            '|' => tokens.push(Token::Pipe),
            '.' => {
                let name = take_ident(&mut chars);
                if name.is_empty() {
                    return Err(error(source, "expected field name after '.'"));
                }
                tokens.push(Token::Field(name));
            }
            '"' => tokens.push(Token::Text(lex_quoted(source, &mut chars)?)),
            '`' => tokens.push(Token::Text(lex_raw(source, &mut chars)?)),
            c if c.is_whitespace() => {}
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = c.to_string();
                name.push_str(&take_ident(&mut chars));
                tokens.push(Token::Ident(name));
            }
            other => {
                return Err(error(source, &format!("unexpected character {other:?}")));
            }
        }
    }

    Err(error(source, "unclosed action"))
}

fn take_ident(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut name = String::new();
    while let Some((_, c)) = chars.next_if(|(_, c)| c.is_ascii_alphanumeric() || *c == '_') {
        name.push(c);
    }
    name
}

fn lex_quoted(
    source: &str,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<String, TemplateError> {
    let mut text = String::new();

    while let Some((_, c)) = chars.next() {
        match c {
            '"' => return Ok(text),
            '\\' => match chars.next() {
                Some((_, '"')) => text.push('"'),
                Some((_, '\\')) => text.push('\\'),
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, other)) => {
                    return Err(error(source, &format!("unknown escape \\{other}")));
                }
                None => break,
            },
            c => text.push(c),
        }
    }

    Err(error(source, "unterminated string"))
}

fn lex_raw(source: &str, chars: &mut Peekable<CharIndices<'_>>) -> Result<String, TemplateError> {
    let mut text = String::new();

    for (_, c) in chars.by_ref() {
        if c == '`' {
            return Ok(text);
        }
        text.push(c);
    }

    Err(error(source, "unterminated raw string"))
}

fn error(source: &str, message: &str) -> TemplateError {
    TemplateError::Parse {
        template: source.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(source: &str) -> String {
        match parse(source).unwrap_err() {
            TemplateError::Parse { message, .. } => message,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn literal_only() {
        assert_eq!(parse("plain").unwrap(), vec![Node::Literal("plain".into())]);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn field_piped_into_function() {
        let nodes = parse("id={{ .source | pathescape }}!").unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::Literal("id=".into()),
                Node::Action(Pipeline {
                    commands: vec![
                        Command::Value(Term::Variable("source".into())),
                        Command::Call {
                            function: "pathescape".into(),
                            args: vec![],
                        },
                    ],
                }),
                Node::Literal("!".into()),
            ]
        );
    }

    #[test]
    fn compact_action_and_call_arguments() {
        let nodes = parse(r#"{{pathescape "a/b"}}"#).unwrap();
        assert_eq!(
            nodes,
            vec![Node::Action(Pipeline {
                commands: vec![Command::Call {
                    function: "pathescape".into(),
                    args: vec![Term::Text("a/b".into())],
                }],
            })]
        );
    }

    #[test]
    fn strings_may_contain_braces() {
        let nodes = parse(r#"{{ "}}" }}"#).unwrap();
        assert_eq!(
            nodes,
            vec![Node::Action(Pipeline {
                commands: vec![Command::Value(Term::Text("}}".into()))],
            })]
        );
    }

    #[test]
    fn malformed_actions() {
        assert_eq!(message("{{ .source"), "unclosed action");
        assert_eq!(message("{{ }}"), "empty action");
        assert_eq!(message("{{ .a | }}"), "missing command in pipeline");
        assert_eq!(message("{{ . }}"), "expected field name after '.'");
        assert_eq!(message("{{ .a .b }}"), "unexpected argument after value");
        assert_eq!(message("{{ pwd | .a }}"), "cannot pipe into a value");
        assert_eq!(message(r#"{{ "abc }}"#), "unterminated string");
        assert_eq!(message("{{ $x }}"), "unexpected character '$'");
    }
}
