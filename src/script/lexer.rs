//! Turns Draw++ source text into tokens.

use super::ScriptError;
use super::ast::Builtin;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    Si,
    Sinon,
    Pour,
    De,
    /// `à`; a bare `a` is accepted in the same position by the parser
    A,
    TantQue,
    Afficher,

    // Operators
    Arrow,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,

    // Literals and names
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Builtin(Builtin),

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,

    Eof,
}

impl TokenKind {
    /// Human-readable form for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Si => "'si'".into(),
            TokenKind::Sinon => "'sinon'".into(),
            TokenKind::Pour => "'pour'".into(),
            TokenKind::De => "'de'".into(),
            TokenKind::A => "'à'".into(),
            TokenKind::TantQue => "'tantque'".into(),
            TokenKind::Afficher => "'afficher'".into(),
            TokenKind::Arrow => "'->'".into(),
            TokenKind::Eq => "'==>'".into(),
            TokenKind::NotEq => "'!='".into(),
            TokenKind::Lt => "'<'".into(),
            TokenKind::Gt => "'>'".into(),
            TokenKind::LtEq => "'<='".into(),
            TokenKind::GtEq => "'>='".into(),
            TokenKind::Plus => "'+'".into(),
            TokenKind::Minus => "'-'".into(),
            TokenKind::Star => "'*'".into(),
            TokenKind::Slash => "'/'".into(),
            TokenKind::Int(n) => format!("number {n}"),
            TokenKind::Float(n) => format!("number {n}"),
            TokenKind::Str(s) => format!("string \"{s}\""),
            TokenKind::Ident(name) => format!("name '{name}'"),
            TokenKind::Builtin(b) => format!("'{}'", b.name()),
            TokenKind::LParen => "'('".into(),
            TokenKind::RParen => "')'".into(),
            TokenKind::LBrace => "'{'".into(),
            TokenKind::RBrace => "'}'".into(),
            TokenKind::Comma => "','".into(),
            TokenKind::Eof => "end of input".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Tokenizes `source`. The returned list always ends with [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScriptError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    source: &'a str,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
            source,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token {
            kind,
            line: self.line,
        });
    }

    fn next_if(&mut self, expected: char) -> bool {
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn run(mut self) -> Result<Vec<Token>, ScriptError> {
        while let Some((start, c)) = self.chars.next() {
            match c {
                '\n' => self.line += 1,
                c if c.is_whitespace() => {}
                '#' => {
                    while self.chars.next_if(|&(_, c)| c != '\n').is_some() {}
                }
                '(' => self.push(TokenKind::LParen),
                ')' => self.push(TokenKind::RParen),
                '{' => self.push(TokenKind::LBrace),
                '}' => self.push(TokenKind::RBrace),
                ',' => self.push(TokenKind::Comma),
                '+' => self.push(TokenKind::Plus),
                '*' => self.push(TokenKind::Star),
                '/' => self.push(TokenKind::Slash),
                '-' => {
                    if self.next_if('>') {
                        self.push(TokenKind::Arrow);
                    } else {
                        self.push(TokenKind::Minus);
                    }
                }
                '=' => {
                    // `==>` and a lone `=` both compare for equality.
                    if self.next_if('=') && !self.next_if('>') {
                        return Err(ScriptError::UnexpectedChar {
                            line: self.line,
                            ch: '=',
                        });
                    }
                    self.push(TokenKind::Eq);
                }
                '!' => {
                    if !self.next_if('=') {
                        return Err(ScriptError::UnexpectedChar {
                            line: self.line,
                            ch: '!',
                        });
                    }
                    self.push(TokenKind::NotEq);
                }
                '<' => {
                    let kind = if self.next_if('=') {
                        TokenKind::LtEq
                    } else {
                        TokenKind::Lt
                    };
                    self.push(kind);
                }
                '>' => {
                    let kind = if self.next_if('=') {
                        TokenKind::GtEq
                    } else {
                        TokenKind::Gt
                    };
                    self.push(kind);
                }
                '"' => self.string()?,
                'à' => self.push(TokenKind::A),
                c if c.is_ascii_digit() => self.number(start)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.word(start),
                other => {
                    return Err(ScriptError::UnexpectedChar {
                        line: self.line,
                        ch: other,
                    });
                }
            }
        }

        self.push(TokenKind::Eof);
        Ok(self.tokens)
    }

    fn string(&mut self) -> Result<(), ScriptError> {
        let line = self.line;
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => break,
                Some((_, c)) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    text.push(c);
                }
                None => return Err(ScriptError::UnterminatedString { line }),
            }
        }
        self.tokens.push(Token {
            kind: TokenKind::Str(text),
            line,
        });
        Ok(())
    }

    fn number(&mut self, start: usize) -> Result<(), ScriptError> {
        let mut end = start + 1;
        let mut is_float = false;
        while let Some(&(idx, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                end = idx + 1;
                self.chars.next();
            } else if c == '.' && !is_float && self.digit_follows(idx + 1) {
                is_float = true;
                end = idx + 1;
                self.chars.next();
            } else {
                break;
            }
        }

        let text = &self.source[start..end];
        let kind = if is_float {
            text.parse().map(TokenKind::Float).ok()
        } else {
            text.parse().map(TokenKind::Int).ok()
        };
        match kind {
            Some(kind) => {
                self.push(kind);
                Ok(())
            }
            None => Err(ScriptError::InvalidNumber {
                line: self.line,
                text: text.to_string(),
            }),
        }
    }

    fn digit_follows(&self, idx: usize) -> bool {
        self.source[idx..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    }

    fn word(&mut self, start: usize) {
        let mut end = start + 1;
        while let Some(&(idx, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                end = idx + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }

        let word = &self.source[start..end];
        let kind = match word {
            "si" => TokenKind::Si,
            "sinon" => TokenKind::Sinon,
            "pour" => TokenKind::Pour,
            "de" => TokenKind::De,
            "tantque" => TokenKind::TantQue,
            "afficher" => TokenKind::Afficher,
            other => match Builtin::from_name(other) {
                Some(builtin) => TokenKind::Builtin(builtin),
                None => TokenKind::Ident(other.to_string()),
            },
        };
        self.push(kind);
    }
}
