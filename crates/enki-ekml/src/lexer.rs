//! Tokenizer for `.ekml` source text.

use crate::error::ParseError;

/// One meaningful unit of `.ekml` source.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: item names, property keys, enum-like values.
    Ident(String),
    /// Double-quoted string with its escape sequences already applied.
    Text(String),
    Number(f32),
    /// Straight-alpha RGBA bytes from `#rrggbb` or `#rrggbbaa`.
    Color([u8; 4]),
    Colon,
    OpenBrace,
    CloseBrace,
    Import,
    As,
    Eof,
}

/// A token tagged with the 1-based line and column of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

/// Single-pass scanner over `.ekml` source text.
///
/// Whitespace and comments never become lexemes; every produced lexeme
/// carries the position of its first character so later stages can report
/// exact locations without touching the source again.
pub struct Lexer<'s> {
    src: &'s str,
    offset: usize,
    line: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, offset: 0, line: 1, col: 1 }
    }

    /// Scan the whole source. The stream always ends with one `Eof` lexeme.
    pub fn tokenize(mut self) -> Result<Vec<Lexeme>, ParseError> {
        let mut stream = Vec::new();
        loop {
            self.skip_trivia();
            let (line, col) = (self.line, self.col);
            let token = self.scan_token()?;
            let done = token == Token::Eof;
            stream.push(Lexeme { token, line, col });
            if done {
                return Ok(stream);
            }
        }
    }

    fn rest(&self) -> &'s str {
        &self.src[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consume characters while `keep` holds, returning the consumed span.
    fn eat_while(&mut self, keep: impl Fn(char) -> bool) -> &'s str {
        let from = self.offset;
        while matches!(self.peek(), Some(c) if keep(c)) {
            self.bump();
        }
        &self.src[from..self.offset]
    }

    fn fail(&self, message: impl Into<String>) -> ParseError {
        ParseError::at(message, self.line, self.col)
    }

    /// Skip whitespace, `//` line comments, and `/* */` block comments.
    fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);
            if self.rest().starts_with("//") {
                self.eat_while(|c| c != '\n');
            } else if self.rest().starts_with("/*") {
                self.bump();
                self.bump();
                while !self.rest().starts_with("*/") {
                    if self.bump().is_none() {
                        // Runaway comment: scanning resumes at end of input.
                        return;
                    }
                }
                self.bump();
                self.bump();
            } else {
                return;
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token, ParseError> {
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };
        match ch {
            ':' => {
                self.bump();
                Ok(Token::Colon)
            }
            '{' => {
                self.bump();
                Ok(Token::OpenBrace)
            }
            '}' => {
                self.bump();
                Ok(Token::CloseBrace)
            }
            '"' => self.scan_text(),
            '#' => self.scan_color(),
            '-' => self.scan_number(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.scan_word()),
            other => Err(self.fail(format!("unexpected character {other:?}"))),
        }
    }

    fn scan_text(&mut self) -> Result<Token, ParseError> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(Token::Text(text)),
                Some('\\') => {
                    let Some(esc) = self.bump() else {
                        return Err(self.fail("source ends inside an escape sequence"));
                    };
                    text.push(unescape(esc));
                }
                Some(ch) => text.push(ch),
                None => return Err(self.fail("unterminated string")),
            }
        }
    }

    fn scan_color(&mut self) -> Result<Token, ParseError> {
        self.bump();
        let digits = self.eat_while(|c| c.is_ascii_hexdigit());
        let rgba = match (digits.len(), u32::from_str_radix(digits, 16)) {
            (6, Ok(rgb)) => {
                let [_, r, g, b] = rgb.to_be_bytes();
                [r, g, b, 0xff]
            }
            (8, Ok(word)) => word.to_be_bytes(),
            _ => {
                return Err(self.fail(format!(
                    "color wants 6 or 8 hex digits (#rrggbb / #rrggbbaa), found {}",
                    digits.len()
                )));
            }
        };
        Ok(Token::Color(rgba))
    }

    fn scan_number(&mut self) -> Result<Token, ParseError> {
        let from = self.offset;
        if self.peek() == Some('-') {
            self.bump();
        }
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump();
            self.eat_while(|c| c.is_ascii_digit());
        }
        let text = &self.src[from..self.offset];
        match text.parse() {
            Ok(value) => Ok(Token::Number(value)),
            Err(_) => Err(self.fail(format!("malformed number {text:?}"))),
        }
    }

    fn scan_word(&mut self) -> Token {
        let word = self.eat_while(|c| c.is_alphanumeric() || c == '_');
        match word {
            "import" => Token::Import,
            "as" => Token::As,
            _ => Token::Ident(word.to_owned()),
        }
    }
}

/// Unknown escapes pass the character through unchanged, so `\"` and `\\`
/// need no arms of their own.
fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Lexeme> {
        Lexer::new(src).tokenize().unwrap()
    }

    #[test]
    fn records_the_start_position_of_each_token() {
        let stream = lex("Group {\n  t: 0.5\n}");
        let at = |i: usize| (stream[i].line, stream[i].col);
        assert_eq!(stream[0].token, Token::Ident("Group".into()));
        assert_eq!(at(0), (1, 1));
        assert_eq!(at(1), (1, 7));
        assert_eq!(stream[4].token, Token::Number(0.5));
        assert_eq!(at(4), (2, 6));
        assert_eq!(at(5), (3, 1));
    }

    #[test]
    fn comments_are_invisible_to_the_stream() {
        let tokens: Vec<_> = lex("/* a */ x // b\n: /* c */ 1")
            .into_iter()
            .map(|l| l.token)
            .collect();
        let expected = [
            Token::Ident("x".into()),
            Token::Colon,
            Token::Number(1.0),
            Token::Eof,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn keywords_are_not_idents() {
        let stream = lex("import as importer");
        assert_eq!(stream[0].token, Token::Import);
        assert_eq!(stream[1].token, Token::As);
        assert_eq!(stream[2].token, Token::Ident("importer".into()));
    }
}
