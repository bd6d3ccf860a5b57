//! SGF reader
//!
//! Tokenizes with logos and builds a [`MoveTree`] with a small
//! recursive-descent parser. Only the first game tree of a collection is read.
//!
//! ```text
//! GameTree   = "(" Sequence { GameTree } ")"
//! Sequence   = Node { Node }
//! Node       = ";" { Property }
//! Property   = PropIdent PropValue { PropValue }
//! ```

use logos::{Lexer, Logos};
use thiserror::Error;

use super::movetree::{MoveTree, NodeId};
use super::properties::Properties;

#[derive(Debug, Error, PartialEq)]
pub enum SgfError {
    #[error("Unrecognized SGF input at byte {0}")]
    Lex(usize),

    #[error("Expected {expected} at byte {offset}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    #[error("Unexpected end of SGF input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("Property {prop} at byte {offset} has no value")]
    MissingValue { prop: String, offset: usize },

    #[error("Game tree at byte {0} has no nodes")]
    EmptySequence(usize),
}

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Token {
    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(";")]
    Semicolon,

    #[regex(r"[A-Za-z]+", prop_ident)]
    PropIdent(String),

    #[regex(r"\[([^\]\\]|\\.|\\\n)*\]", |lex| unescape(lex.slice()))]
    PropValue(String),
}

/// FF[3] allowed lowercase letters in identifiers; only the capitals count.
/// An identifier without capitals is a lex error.
fn prop_ident(lex: &mut Lexer<Token>) -> Option<String> {
    let ident: String = lex.slice().chars().filter(char::is_ascii_uppercase).collect();
    (!ident.is_empty()).then_some(ident)
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::OpenParen => "'('".to_string(),
            Token::CloseParen => "')'".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::PropIdent(id) => format!("property {}", id),
            Token::PropValue(_) => "property value".to_string(),
        }
    }
}

/// Strips the brackets and resolves escapes; an escaped newline is a soft break
fn unescape(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('\n') | None => {}
                Some(escaped) => out.push(escaped),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, SgfError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span().start)),
            Err(()) => return Err(SgfError::Lex(lexer.span().start)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    tree: MoveTree,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map(|(_, o)| *o).unwrap_or(0)
    }

    fn expect(&mut self, expected: Token, name: &'static str) -> Result<(), SgfError> {
        match self.tokens.get(self.pos) {
            Some((token, _)) if *token == expected => {
                self.pos += 1;
                Ok(())
            }
            Some((token, offset)) => Err(SgfError::Unexpected {
                expected: name,
                found: token.describe(),
                offset: *offset,
            }),
            None => Err(SgfError::UnexpectedEnd(name)),
        }
    }

    /// Parses one game tree whose first node hangs under `parent` (the root when `None`)
    fn game_tree(&mut self, parent: Option<NodeId>) -> Result<(), SgfError> {
        let start = self.offset();
        self.expect(Token::OpenParen, "'('")?;

        let mut last = parent;
        let mut nodes = 0;
        while self.peek() == Some(&Token::Semicolon) {
            self.pos += 1;
            let props = self.properties()?;
            last = Some(match last {
                None => {
                    let root = self.tree.root_id();
                    *self.tree.properties_mut(root) = props;
                    root
                }
                Some(p) => self.tree.add_child(p, props),
            });
            nodes += 1;
        }
        if nodes == 0 {
            return Err(SgfError::EmptySequence(start));
        }

        while self.peek() == Some(&Token::OpenParen) {
            self.game_tree(last)?;
        }

        self.expect(Token::CloseParen, "')'")
    }

    fn properties(&mut self) -> Result<Properties, SgfError> {
        let mut props = Properties::new();
        while let Some(Token::PropIdent(ident)) = self.peek() {
            let ident = ident.clone();
            let offset = self.offset();
            self.pos += 1;

            let mut values = Vec::new();
            while let Some(Token::PropValue(value)) = self.peek() {
                values.push(value.clone());
                self.pos += 1;
            }
            if values.is_empty() {
                return Err(SgfError::MissingValue {
                    prop: ident,
                    offset,
                });
            }
            for value in values {
                props.add(ident.clone(), value);
            }
        }
        Ok(props)
    }
}

/// Parses the first game tree of an SGF collection
pub fn parse(source: &str) -> Result<MoveTree, SgfError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        tree: MoveTree::new(),
    };
    parser.game_tree(None)?;
    Ok(parser.tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_game() {
        let tree = parse("(;GM[1]C[A Game!];B[aa]C[Here's a move])").unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root().properties().comment(), Some("A Game!"));
        let child = tree.root().child(0).unwrap();
        assert_eq!(child.properties().get_one("B"), Some("aa"));
        assert_eq!(child.properties().comment(), Some("Here's a move"));
    }

    #[test]
    fn parses_variations() {
        let tree = parse("(;GM[1];B[aa](;W[bb];B[cc])(;W[dd]))").unwrap();
        let first = tree.root().child(0).unwrap();
        assert_eq!(first.num_children(), 2);
        assert_eq!(first.child(1).unwrap().properties().get_one("W"), Some("dd"));
        assert_eq!(
            first.child(0).unwrap().child(0).unwrap().properties().get_one("B"),
            Some("cc")
        );
    }

    #[test]
    fn parses_multiple_values_and_escapes() {
        let tree = parse("(;AB[aa][bb]C[a \\] b\\\nc])").unwrap();
        let props = tree.root().properties();
        assert_eq!(props.get_all("AB"), &["aa".to_string(), "bb".to_string()]);
        assert_eq!(props.comment(), Some("a ] bc"));
    }

    #[test]
    fn keeps_only_capitals_in_identifiers() {
        let tree = parse("(;CoPyright[me])").unwrap();
        assert_eq!(tree.root().properties().get_one("CP"), Some("me"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(parse("(;B[aa]"), Err(SgfError::UnexpectedEnd(_))));
        assert!(matches!(parse("()"), Err(SgfError::EmptySequence(0))));
        assert!(matches!(parse("(;B)"), Err(SgfError::MissingValue { .. })));
        assert!(matches!(parse(";B[aa]"), Err(SgfError::Unexpected { .. })));
        assert!(matches!(parse("(;B[aa]%)"), Err(SgfError::Lex(_))));
    }

    #[test]
    fn lowercase_only_identifiers_are_rejected() {
        assert_eq!(parse("(;abc[x])").unwrap_err(), SgfError::Lex(2));
        let tree = parse("(;AddBlack[aa])").unwrap();
        assert_eq!(tree.root().properties().get_one("AB"), Some("aa"));
    }
}
