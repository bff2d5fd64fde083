//! Split unfolded iCalendar text into tokens.
//!
//! The lexer is a state machine over the content line grammar
//! `name *(";" param-name "=" param-value *("," param-value)) ":" value CRLF`.
//! BEGIN/END lines of VCALENDAR, VEVENT and VALARM are recognised as whole
//! literals and come out as a single delimiter token.
//!
//! Tokens are produced lazily, one per call to `next`. The stream ends
//! after an `Eof` token, when the input runs out right after a delimiter
//! line without a trailing CRLF, or after the first error.
//!
//! # Examples
//!
//! ```rust
//! use icalstream::parser::{Lexer, TokenKind};
//!
//! let kinds = Lexer::new("DTSTART;TZID=Europe/Berlin:20230615T120000\r\n")
//!     .map(|token| token.unwrap().kind)
//!     .collect::<Vec<_>>();
//! assert_eq!(kinds.first(), Some(&TokenKind::Name));
//! assert_eq!(kinds.last(), Some(&TokenKind::Eof));
//! ```

use std::fmt;

use super::token::{DELIMITERS, Token, TokenKind};
use crate::{
    CRLF, PARAM_DELIMITER, PARAM_NAME_DELIMITER, PARAM_QUOTE, PARAM_VALUE_DELIMITER,
    VALUE_DELIMITER,
};

/// Error arising when the input does not follow the content line grammar.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LexerError {
    #[error("Position {0}: unable to find end of line \"CRLF\".")]
    MissingLineEnd(usize),
    #[error("Position {0}: unrecognized character in content line: {1}.")]
    UnexpectedChar(usize, Found),
    #[error("Position {0}: missing \"=\" after parameter name, got {1}.")]
    MissingParamNameDelimiter(usize, Found),
    #[error("Position {0}: missing closing quote for parameter value.")]
    MissingClosingQuote(usize),
}

/// The character the lexer stumbled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfInput,
}

impl From<Option<char>> for Found {
    fn from(c: Option<char>) -> Self {
        c.map_or(Self::EndOfInput, Self::Char)
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c:?} (U+{:04X})", u32::from(*c)),
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Component,
    NewLine,
    AfterLineEnd,
    ContentLine,
    ParamName,
    ParamNameDelimiter,
    ParamValue,
    ClosingQuote,
    Value,
    Halted,
}

pub struct Lexer<'a> {
    input: &'a str,
    /// Start of the token being scanned.
    start: usize,
    pos: usize,
    state: State,
}

/// Alphabetic characters, ASCII digits and `-`. Other numerals such as
/// `²` or `½` end the name.
fn is_name(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || c == '-'
}

fn is_qsafe_char(c: char) -> bool {
    !c.is_control() && c != PARAM_QUOTE
}

fn is_safe_char(c: char) -> bool {
    is_qsafe_char(c)
        && c != PARAM_DELIMITER
        && c != VALUE_DELIMITER
        && c != PARAM_VALUE_DELIMITER
}

fn is_value_char(c: char) -> bool {
    c == '\t' || !c.is_control()
}

impl<'a> Lexer<'a> {
    /// Create a lexer over already unfolded input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            state: State::Component,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn accept_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    /// Drop everything scanned since the last token.
    fn ignore(&mut self) {
        self.start = self.pos;
    }

    fn emit(&mut self, kind: TokenKind) -> Token<'a> {
        let token = Token::new(kind, self.start, &self.input[self.start..self.pos]);
        self.start = self.pos;
        token
    }

    /// Run one state. Returns the state to continue with and at most one
    /// token or error.
    fn step(&mut self) -> (State, Option<Result<Token<'a>, LexerError>>) {
        match self.state {
            State::Component => {
                let rest = self.rest();
                if let Some((literal, delimiter)) = DELIMITERS
                    .entries()
                    .find(|(literal, _)| rest.starts_with(**literal))
                {
                    self.pos += literal.len();
                    let token = self.emit(TokenKind::Delimiter(*delimiter));
                    return (State::NewLine, Some(Ok(token)));
                }
                // An empty name still moves on, the next state reports the
                // offending character.
                self.accept_while(is_name);
                (State::ContentLine, Some(Ok(self.emit(TokenKind::Name))))
            }
            State::NewLine => {
                if self.peek().is_none() {
                    return (State::Halted, None);
                }
                if !self.rest().starts_with(CRLF) {
                    return (State::Halted, Some(Err(LexerError::MissingLineEnd(self.pos))));
                }
                self.pos += CRLF.len();
                (State::AfterLineEnd, Some(Ok(self.emit(TokenKind::LineEnd))))
            }
            State::AfterLineEnd => match self.peek() {
                None => (State::Halted, Some(Ok(self.emit(TokenKind::Eof)))),
                Some(_) => (State::Component, None),
            },
            State::ContentLine => {
                let pos = self.pos;
                let (kind, next) = match self.bump() {
                    Some(PARAM_DELIMITER) => (TokenKind::SemiColon, State::ParamName),
                    Some(VALUE_DELIMITER) => (TokenKind::Colon, State::Value),
                    Some(PARAM_VALUE_DELIMITER) => (TokenKind::Comma, State::ParamValue),
                    found => {
                        let err = LexerError::UnexpectedChar(pos, found.into());
                        return (State::Halted, Some(Err(err)));
                    }
                };
                (next, Some(Ok(self.emit(kind))))
            }
            State::ParamName => {
                self.accept_while(is_name);
                (
                    State::ParamNameDelimiter,
                    Some(Ok(self.emit(TokenKind::ParamName))),
                )
            }
            State::ParamNameDelimiter => {
                let pos = self.pos;
                match self.bump() {
                    Some(PARAM_NAME_DELIMITER) => {
                        (State::ParamValue, Some(Ok(self.emit(TokenKind::Equal))))
                    }
                    found => {
                        let err = LexerError::MissingParamNameDelimiter(pos, found.into());
                        (State::Halted, Some(Err(err)))
                    }
                }
            }
            State::ParamValue => {
                if self.peek() == Some(PARAM_QUOTE) {
                    self.bump();
                    self.ignore();
                    self.accept_while(is_qsafe_char);
                    (
                        State::ClosingQuote,
                        Some(Ok(self.emit(TokenKind::ParamValue))),
                    )
                } else {
                    self.accept_while(is_safe_char);
                    (
                        State::ContentLine,
                        Some(Ok(self.emit(TokenKind::ParamValue))),
                    )
                }
            }
            State::ClosingQuote => {
                if self.peek() != Some(PARAM_QUOTE) {
                    let err = LexerError::MissingClosingQuote(self.pos);
                    return (State::Halted, Some(Err(err)));
                }
                self.bump();
                self.ignore();
                (State::ContentLine, None)
            }
            State::Value => {
                self.accept_while(is_value_char);
                (State::NewLine, Some(Ok(self.emit(TokenKind::Value))))
            }
            State::Halted => (State::Halted, None),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state != State::Halted {
            let (next, item) = self.step();
            self.state = next;
            if item.is_some() {
                return item;
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}
