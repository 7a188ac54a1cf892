#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    /// Plain or dotted identifier: `a`, `rec.field.x`.
    Ident(String),
    Literal(Literal),
    Operator(Operator),
    LBrace,
    RBrace,
    LParen,
    RParen,
    Comma,
    Colon,
    ColonEquals,
    Equals,
    Pipe,
    Backtick,
}

impl Token {
    pub fn is_dotted(&self) -> bool {
        match self {
            Token::Ident(s) => s.contains('.'),
            _ => false,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Literal(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            LBrace => write!(f, "{{"),
            RBrace => write!(f, "}}"),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            ColonEquals => write!(f, ":="),
            Equals => write!(f, "="),
            Pipe => write!(f, "|"),
            Backtick => write!(f, "`"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(f64),
    /// Decoded bytes, escapes already applied.
    String(Vec<u8>),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{:?}", String::from_utf8_lossy(s)),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Multiply,
    Plus,
    Caret,
    Less,
    Ampersand,
    Greater,
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Operator> {
        use Operator::*;
        match ch {
            '*' => Some(Multiply),
            '+' => Some(Plus),
            '^' => Some(Caret),
            '<' => Some(Less),
            '&' => Some(Ampersand),
            '>' => Some(Greater),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Multiply => write!(f, "*"),
            Plus => write!(f, "+"),
            Caret => write!(f, "^"),
            Less => write!(f, "<"),
            Ampersand => write!(f, "&"),
            Greater => write!(f, ">"),
        }
    }
}
