//! Recursive-descent parser assembling a [`Document`] from the token stream.

use crate::ast::{Document, Import, Node, Prop, Value};
use crate::error::ParseError;
use crate::lexer::{Lexeme, Lexer, Token};

/// Parse `.ekml` source into a [`Document`].
///
/// The lexer runs eagerly first, so the parser works over a finished stream
/// and every error points at the offending token rather than past it.
pub fn parse(src: &str) -> Result<Document, ParseError> {
    let stream = Lexer::new(src).tokenize()?;
    Parser { stream, cursor: 0 }.document()
}

struct Parser {
    stream: Vec<Lexeme>,
    cursor: usize,
}

impl Parser {
    /// The lexeme under the cursor. [`Lexer::tokenize`] always emits a final
    /// `Eof`, and `take` refuses to move past it, so the cursor stays in
    /// bounds.
    fn head(&self) -> &Lexeme {
        &self.stream[self.cursor]
    }

    fn peek(&self) -> &Token {
        &self.head().token
    }

    fn peek2(&self) -> &Token {
        self.stream.get(self.cursor + 1).map_or(&Token::Eof, |l| &l.token)
    }

    fn take(&mut self) -> Lexeme {
        let lexeme = self.head().clone();
        if self.cursor + 1 < self.stream.len() {
            self.cursor += 1;
        }
        lexeme
    }

    fn ident(&mut self, what: &str) -> Result<String, ParseError> {
        match self.take() {
            Lexeme { token: Token::Ident(name), .. } => Ok(name),
            other => Err(fail_at(&other, format!("expected {what}, found {:?}", other.token))),
        }
    }

    fn text(&mut self, what: &str) -> Result<String, ParseError> {
        match self.take() {
            Lexeme { token: Token::Text(s), .. } => Ok(s),
            other => Err(fail_at(&other, format!("expected {what}, found {:?}", other.token))),
        }
    }

    fn expect(&mut self, wanted: Token) -> Result<(), ParseError> {
        let lexeme = self.take();
        if lexeme.token == wanted {
            Ok(())
        } else {
            Err(fail_at(&lexeme, format!("expected {wanted:?}, found {:?}", lexeme.token)))
        }
    }

    /// `import "path" as Alias`* followed by the root node.
    fn document(&mut self) -> Result<Document, ParseError> {
        let mut imports = Vec::new();
        while *self.peek() == Token::Import {
            self.take();
            let path = self.text("an import path")?;
            self.expect(Token::As)?;
            let alias = self.ident("an import alias")?;
            imports.push(Import { path, alias });
        }
        let root = self.node()?;
        Ok(Document { imports, root })
    }

    /// `Name ["inline text"] [{ ... }]`
    fn node(&mut self) -> Result<Node, ParseError> {
        let item = self.ident("an item name")?;

        let content = match self.peek() {
            Token::Text(s) => {
                let s = s.clone();
                self.take();
                Some(s)
            }
            _ => None,
        };

        let (props, children) = match self.peek() {
            Token::OpenBrace => self.block()?,
            _ => (Vec::new(), Vec::new()),
        };

        Ok(Node { item, content, props, children })
    }

    /// The body of a `{ ... }` block: any mix of `key: value` properties and
    /// child nodes. An `Ident` starts a property exactly when the token after
    /// it is `:`, otherwise it names a child item.
    fn block(&mut self) -> Result<(Vec<Prop>, Vec<Node>), ParseError> {
        self.take();
        let mut props = Vec::new();
        let mut children = Vec::new();
        loop {
            match self.peek() {
                Token::CloseBrace => {
                    self.take();
                    return Ok((props, children));
                }
                Token::Eof => {
                    return Err(fail_at(self.head(), "a block is missing its closing '}'"));
                }
                Token::Ident(_) if *self.peek2() == Token::Colon => {
                    let key = self.ident("a property key")?;
                    self.expect(Token::Colon)?;
                    let value = self.value()?;
                    props.push(Prop { key, value });
                }
                Token::Ident(_) => children.push(self.node()?),
                other => {
                    return Err(fail_at(
                        self.head(),
                        format!("found {other:?} where a property or child item belongs"),
                    ));
                }
            }
        }
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        match self.take() {
            Lexeme { token: Token::Text(s), .. } => Ok(Value::Str(s)),
            Lexeme { token: Token::Number(n), .. } => Ok(Value::Number(n)),
            Lexeme { token: Token::Color(c), .. } => Ok(Value::Color(c)),
            Lexeme { token: Token::Ident(s), .. } => Ok(Value::Ident(s)),
            other => Err(fail_at(&other, format!("expected a value, found {:?}", other.token))),
        }
    }
}

fn fail_at(lexeme: &Lexeme, message: impl Into<String>) -> ParseError {
    ParseError::at(message, lexeme.line, lexeme.col)
}
