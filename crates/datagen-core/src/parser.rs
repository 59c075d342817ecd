//! Parser for SQL-style type strings.
//!
//! Accepts the type syntax used in `CREATE TABLE` column lists:
//!
//! ```text
//! CHAR(1)  VARCHAR(10)  STRING  DECIMAL(32, 2)  TIMESTAMP(3)
//! TIMESTAMP WITH LOCAL TIME ZONE  INT ARRAY  DECIMAL(32,2) MULTISET
//! ARRAY<INT>  MAP<STRING, DATE>  ROW<a BIGINT, b TIME, c ROW<d TIMESTAMP>>
//! ```
//!
//! Keywords are case-insensitive. Field names may be quoted with backticks.
//! `NOT NULL` is accepted after ROW fields only; column nullability is set on
//! the column definition.

use crate::schema::SchemaError;
use crate::types::{
    DataType, RowField, DEFAULT_DECIMAL_PRECISION, DEFAULT_TIMESTAMP_PRECISION,
    DEFAULT_TIME_PRECISION, MAX_LENGTH,
};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Quoted(String),
    Literal(String),
    Number(i64),
    LParen,
    RParen,
    Lt,
    Gt,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Word(w) | Token::Quoted(w) => format!("'{w}'"),
            Token::Literal(s) => format!("string literal '{s}'"),
            Token::Number(n) => format!("number {n}"),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Lt => "'<'".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::Comma => "','".to_string(),
        }
    }
}

/// Parse a type string into a `DataType`.
pub fn parse_data_type(input: &str) -> Result<DataType, SchemaError> {
    let tokens = tokenize(input)?;
    let mut parser = TypeParser {
        input,
        tokens,
        pos: 0,
    };
    let data_type = parser.parse_type()?;
    if let Some(token) = parser.peek() {
        return Err(parser.error(format!("unexpected {}", token.describe())));
    }
    Ok(data_type)
}

fn tokenize(input: &str) -> Result<Vec<Token>, SchemaError> {
    let error = |message: String| SchemaError::InvalidType {
        input: input.to_string(),
        message,
    };

    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' | ')' | '<' | '>' | ',' => {
                chars.next();
                tokens.push(match c {
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '<' => Token::Lt,
                    '>' => Token::Gt,
                    _ => Token::Comma,
                });
            }
            '`' | '\'' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        // A doubled quote is an escaped quote
                        Some(q) if q == c && chars.peek() == Some(&c) => {
                            chars.next();
                            text.push(c);
                        }
                        Some(q) if q == c => break,
                        Some(other) => text.push(other),
                        None => return Err(error(format!("unterminated {c} quote"))),
                    }
                }
                tokens.push(if c == '`' {
                    Token::Quoted(text)
                } else {
                    Token::Literal(text)
                });
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut text = String::new();
                text.push(c);
                chars.next();
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    text.push(d);
                    chars.next();
                }
                let number = text
                    .parse()
                    .map_err(|_| error(format!("invalid number '{text}'")))?;
                tokens.push(Token::Number(number));
            }
            c if c.is_alphanumeric() || c == '_' => {
                let mut word = String::new();
                while let Some(&w) = chars.peek() {
                    if !(w.is_alphanumeric() || w == '_' || w == '$') {
                        break;
                    }
                    word.push(w);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
            other => return Err(error(format!("unexpected character '{other}'"))),
        }
    }

    Ok(tokens)
}

struct TypeParser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl TypeParser<'_> {
    fn error(&self, message: String) -> SchemaError {
        SchemaError::InvalidType {
            input: self.input.to_string(),
            message,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Word(w)) if w.eq_ignore_ascii_case(keyword))
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), SchemaError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword))
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), SchemaError> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(self.unexpected(&token.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> SchemaError {
        match self.peek() {
            Some(token) => self.error(format!("expected {expected}, found {}", token.describe())),
            None => self.error(format!("expected {expected}, found end of input")),
        }
    }

    fn parse_type(&mut self) -> Result<DataType, SchemaError> {
        let mut data_type = self.parse_base_type()?;

        // Postfix collection syntax: `INT ARRAY`, `DECIMAL(32, 2) MULTISET`
        loop {
            if self.eat_keyword("ARRAY") {
                data_type = DataType::array(data_type);
            } else if self.eat_keyword("MULTISET") {
                data_type = DataType::multiset(data_type);
            } else {
                return Ok(data_type);
            }
        }
    }

    fn parse_base_type(&mut self) -> Result<DataType, SchemaError> {
        let word = match self.next() {
            Some(Token::Word(word)) => word.to_ascii_uppercase(),
            Some(other) => return Err(self.error(format!("unexpected {}", other.describe()))),
            None => return Err(self.error("expected a type, found end of input".to_string())),
        };

        match word.as_str() {
            "BOOLEAN" | "BOOL" => Ok(DataType::Boolean),
            "CHAR" | "CHARACTER" => {
                if self.eat_keyword("VARYING") {
                    let length = self.parse_optional_length()?.unwrap_or(1);
                    Ok(DataType::VarChar { length })
                } else {
                    let length = self.parse_optional_length()?.unwrap_or(1);
                    Ok(DataType::Char { length })
                }
            }
            "VARCHAR" => {
                let length = self.parse_optional_length()?.unwrap_or(1);
                Ok(DataType::VarChar { length })
            }
            "STRING" | "TEXT" => Ok(DataType::string()),
            "BINARY" => {
                let length = self.parse_optional_length()?.unwrap_or(1);
                Ok(DataType::Binary { length })
            }
            "VARBINARY" => {
                let length = self.parse_optional_length()?.unwrap_or(1);
                Ok(DataType::VarBinary { length })
            }
            "BYTES" => Ok(DataType::bytes()),
            "DECIMAL" | "DEC" | "NUMERIC" => {
                if self.eat(&Token::LParen) {
                    let precision = self.parse_u8("precision")?;
                    let scale = if self.eat(&Token::Comma) {
                        self.parse_u8("scale")?
                    } else {
                        0
                    };
                    self.expect(Token::RParen)?;
                    Ok(DataType::Decimal { precision, scale })
                } else {
                    Ok(DataType::Decimal {
                        precision: DEFAULT_DECIMAL_PRECISION,
                        scale: 0,
                    })
                }
            }
            "TINYINT" => Ok(DataType::TinyInt),
            "SMALLINT" => Ok(DataType::SmallInt),
            "INT" | "INTEGER" => Ok(DataType::Int),
            "BIGINT" => Ok(DataType::BigInt),
            "FLOAT" | "REAL" => Ok(DataType::Float),
            "DOUBLE" => {
                self.eat_keyword("PRECISION");
                Ok(DataType::Double)
            }
            "DATE" => Ok(DataType::Date),
            "TIME" => {
                let precision = self
                    .parse_optional_precision()?
                    .unwrap_or(DEFAULT_TIME_PRECISION);
                if self.eat_keyword("WITHOUT") {
                    self.expect_time_zone()?;
                }
                Ok(DataType::Time { precision })
            }
            "TIMESTAMP" => {
                let precision = self
                    .parse_optional_precision()?
                    .unwrap_or(DEFAULT_TIMESTAMP_PRECISION);
                if self.eat_keyword("WITHOUT") {
                    self.expect_time_zone()?;
                    Ok(DataType::Timestamp { precision })
                } else if self.eat_keyword("WITH") {
                    if self.eat_keyword("LOCAL") {
                        self.expect_time_zone()?;
                        Ok(DataType::TimestampLtz { precision })
                    } else {
                        Err(SchemaError::UnsupportedKind(
                            "TIMESTAMP WITH TIME ZONE".to_string(),
                        ))
                    }
                } else {
                    Ok(DataType::Timestamp { precision })
                }
            }
            "TIMESTAMP_LTZ" => {
                let precision = self
                    .parse_optional_precision()?
                    .unwrap_or(DEFAULT_TIMESTAMP_PRECISION);
                Ok(DataType::TimestampLtz { precision })
            }
            "ARRAY" => {
                self.expect(Token::Lt)?;
                let element_type = self.parse_type()?;
                self.expect(Token::Gt)?;
                Ok(DataType::array(element_type))
            }
            "MULTISET" => {
                self.expect(Token::Lt)?;
                let element_type = self.parse_type()?;
                self.expect(Token::Gt)?;
                Ok(DataType::multiset(element_type))
            }
            "MAP" => {
                self.expect(Token::Lt)?;
                let key_type = self.parse_type()?;
                self.expect(Token::Comma)?;
                let value_type = self.parse_type()?;
                self.expect(Token::Gt)?;
                Ok(DataType::map(key_type, value_type))
            }
            "ROW" => {
                let close = if self.eat(&Token::Lt) {
                    Token::Gt
                } else {
                    self.expect(Token::LParen)?;
                    Token::RParen
                };
                let mut fields = vec![self.parse_field()?];
                while self.eat(&Token::Comma) {
                    fields.push(self.parse_field()?);
                }
                self.expect(close)?;
                Ok(DataType::Row { fields })
            }
            "NULL" => Ok(DataType::Null),
            "RAW" => {
                self.expect(Token::LParen)?;
                let class_name = match self.next() {
                    Some(Token::Literal(name)) => name,
                    _ => return Err(self.error("RAW expects a quoted class name".to_string())),
                };
                // An optional serializer snapshot follows the class name
                if self.eat(&Token::Comma) {
                    match self.next() {
                        Some(Token::Literal(_)) => {}
                        _ => {
                            return Err(
                                self.error("RAW expects a quoted serializer snapshot".to_string())
                            )
                        }
                    }
                }
                self.expect(Token::RParen)?;
                Ok(DataType::Raw { class_name })
            }
            other => Err(SchemaError::UnsupportedKind(other.to_string())),
        }
    }

    fn parse_field(&mut self) -> Result<RowField, SchemaError> {
        let name = match self.next() {
            Some(Token::Word(name)) | Some(Token::Quoted(name)) => name,
            Some(other) => {
                return Err(self.error(format!("expected a field name, found {}", other.describe())))
            }
            None => return Err(self.error("expected a field name, found end of input".to_string())),
        };
        let data_type = self.parse_type()?;

        let nullable = if self.eat_keyword("NOT") {
            self.expect_keyword("NULL")?;
            false
        } else {
            // An explicit `NULL` marker is the default
            self.eat_keyword("NULL");
            true
        };

        // Optional field description
        if matches!(self.peek(), Some(Token::Literal(_))) {
            self.pos += 1;
        }

        Ok(RowField {
            name,
            data_type,
            nullable,
        })
    }

    fn expect_time_zone(&mut self) -> Result<(), SchemaError> {
        self.expect_keyword("TIME")?;
        self.expect_keyword("ZONE")
    }

    fn parse_optional_length(&mut self) -> Result<Option<u32>, SchemaError> {
        if !self.eat(&Token::LParen) {
            return Ok(None);
        }
        let length = match self.next() {
            Some(Token::Number(n)) if n >= 0 && n <= i64::from(MAX_LENGTH) => n as u32,
            Some(Token::Number(n)) => {
                return Err(self.error(format!(
                    "length {n} is out of range 0..={MAX_LENGTH}"
                )))
            }
            _ => return Err(self.error("expected a length".to_string())),
        };
        self.expect(Token::RParen)?;
        Ok(Some(length))
    }

    fn parse_optional_precision(&mut self) -> Result<Option<u8>, SchemaError> {
        if !self.eat(&Token::LParen) {
            return Ok(None);
        }
        let precision = self.parse_u8("precision")?;
        self.expect(Token::RParen)?;
        Ok(Some(precision))
    }

    fn parse_u8(&mut self, what: &str) -> Result<u8, SchemaError> {
        match self.next() {
            Some(Token::Number(n)) => u8::try_from(n)
                .map_err(|_| self.error(format!("{what} {n} is out of range 0..=255"))),
            _ => Err(self.error(format!("expected {what}"))),
        }
    }
}
