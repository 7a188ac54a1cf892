use super::{token::*, Column, Error};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// A token and where it came from. Lines count from 1, columns from 0.
#[derive(Debug, PartialEq, Clone)]
pub struct Lexeme {
    pub line: usize,
    pub column: Column,
    pub token: Token,
}

pub fn lex(s: &str) -> Result<Vec<Lexeme>> {
    Lexer::new(s).collect()
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    fn new(s: &'a str) -> Lexer<'a> {
        Lexer {
            chars: s.chars().peekable(),
            line: 1,
            col: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// The character after the next one.
    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&pk) = self.chars.peek() {
            if is_whitespace(pk) {
                self.bump();
                continue;
            }
            if pk == '/' && self.peek_second() == Some('/') {
                while let Some(&ch) = self.chars.peek() {
                    if ch == '\n' {
                        break;
                    }
                    self.bump();
                }
                continue;
            }
            break;
        }
    }

    fn number(&mut self) -> Token {
        let mut s = String::new();
        if let Some(&sign) = self.chars.peek() {
            if sign == '-' || sign == '+' {
                s.push(sign);
                self.bump();
            }
        }
        let mut decimal = false;
        while let Some(&pk) = self.chars.peek() {
            if pk.is_ascii_digit() {
                s.push(pk);
                self.bump();
                continue;
            }
            if pk == '.' && !decimal && self.peek_second().map_or(false, |c| c.is_ascii_digit()) {
                decimal = true;
                s.push(pk);
                self.bump();
                continue;
            }
            break;
        }
        match s.parse::<f64>() {
            Ok(n) => Token::Literal(Literal::Number(n)),
            Err(_) => Token::Unknown(s),
        }
    }

    fn string(&mut self, start: usize) -> Result<Token> {
        let mut bytes: Vec<u8> = vec![];
        self.bump();
        loop {
            let ch = match self.bump() {
                Some(ch) => ch,
                None => return Err(self.unterminated(start)),
            };
            match ch {
                '"' => return Ok(Token::Literal(Literal::String(bytes))),
                '\\' => {
                    let escaped = match self.bump() {
                        Some(e) => e,
                        None => return Err(self.unterminated(start)),
                    };
                    let byte = match escaped {
                        'n' => b'\n',
                        't' => b'\t',
                        'r' => b'\r',
                        '\\' => b'\\',
                        '"' => b'"',
                        '0' => 0,
                        other => {
                            let col = self.col.saturating_sub(2)..self.col;
                            return Err(error!(UnknownEscape, Some(self.line), ..&col;
                                format!("\\{}", other)));
                        }
                    };
                    bytes.push(byte);
                }
                _ => {
                    let mut buf = [0; 4];
                    bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
    }

    fn unterminated(&self, start: usize) -> Error {
        error!(UnterminatedLiteral; format!("STRING OPENED AT COLUMN {}", start))
            .in_line_number(Some(self.line))
    }

    fn ident(&mut self) -> Token {
        let mut s = String::new();
        loop {
            while let Some(&pk) = self.chars.peek() {
                if !is_ident(pk) {
                    break;
                }
                s.push(pk);
                self.bump();
            }
            if self.chars.peek() != Some(&'.') {
                return Token::Ident(s);
            }
            s.push('.');
            self.bump();
            match self.chars.peek() {
                Some(&pk) if is_ident_start(pk) => continue,
                _ => return Token::Unknown(s),
            }
        }
    }

    fn minutia(&mut self, ch: char) -> Token {
        self.bump();
        match ch {
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '=' => Token::Equals,
            '|' => Token::Pipe,
            '`' => Token::Backtick,
            ':' => {
                if self.chars.peek() == Some(&'=') {
                    self.bump();
                    Token::ColonEquals
                } else {
                    Token::Colon
                }
            }
            _ => match Operator::from_char(ch) {
                Some(op) => Token::Operator(op),
                None => Token::Unknown(ch.to_string()),
            },
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Lexeme>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace_and_comments();
        let pk = *self.chars.peek()?;
        let line = self.line;
        let start = self.col;
        let signed_number = (pk == '-' || pk == '+')
            && self.peek_second().map_or(false, |c| c.is_ascii_digit());
        let token = if pk.is_ascii_digit() || signed_number {
            self.number()
        } else if is_ident_start(pk) {
            self.ident()
        } else if pk == '"' {
            match self.string(start) {
                Ok(t) => t,
                Err(e) => return Some(Err(e)),
            }
        } else {
            self.minutia(pk)
        };
        // a string may span lines; its column then ends on the first line
        let end = if self.line == line { self.col } else { start + 1 };
        Some(Ok(Lexeme {
            line,
            column: start..end,
            token,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn tokens(s: &str) -> Vec<Token> {
        lex(s).unwrap().into_iter().map(|l| l.token).collect()
    }

    #[test]
    fn test_label_and_rename() {
        assert_eq!(
            tokens("a: 1 b := a"),
            vec![
                Token::Ident("a".to_string()),
                Token::Colon,
                Token::Literal(Literal::Number(1.0)),
                Token::Ident("b".to_string()),
                Token::ColonEquals,
                Token::Ident("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_dotted_ident() {
        assert_eq!(tokens("rec.b.c"), vec![Token::Ident("rec.b.c".to_string())]);
        assert_eq!(tokens("rec."), vec![Token::Unknown("rec.".to_string())]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens("-3 0.5 +(1,2)"),
            vec![
                Token::Literal(Literal::Number(-3.0)),
                Token::Literal(Literal::Number(0.5)),
                Token::Operator(Operator::Plus),
                Token::LParen,
                Token::Literal(Literal::Number(1.0)),
                Token::Comma,
                Token::Literal(Literal::Number(2.0)),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_comment_and_columns() {
        let v = lex("x: 1 // note\n  y").unwrap();
        assert_eq!(v.len(), 4);
        assert_eq!(v[3].line, 2);
        assert_eq!(v[3].column, 2..3);
        assert_eq!(v[0].column, 0..1);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            tokens(r#""a\n\t\"\0""#),
            vec![Token::Literal(Literal::String(vec![
                b'a', b'\n', b'\t', b'"', 0
            ]))]
        );
        assert_eq!(tokens(r#""""#), vec![Token::Literal(Literal::String(vec![]))]);
    }

    #[test]
    fn test_string_errors() {
        let e = lex(r#""abc"#).unwrap_err();
        assert_eq!(e.code(), ErrorCode::UnterminatedLiteral);
        assert_eq!(e.to_string(), "UNTERMINATED LITERAL IN 1; STRING OPENED AT COLUMN 0");
        let e = lex(r#""a\q""#).unwrap_err();
        assert_eq!(e.code(), ErrorCode::UnknownEscape);
        assert_eq!(e.column(), 2..4);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            tokens("* ^ < & > | ` %"),
            vec![
                Token::Operator(Operator::Multiply),
                Token::Operator(Operator::Caret),
                Token::Operator(Operator::Less),
                Token::Operator(Operator::Ampersand),
                Token::Operator(Operator::Greater),
                Token::Pipe,
                Token::Backtick,
                Token::Unknown("%".to_string()),
            ]
        );
    }
}
