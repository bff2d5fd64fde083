use derive_more::Display;
use std::fmt;

/// BEGIN/END markers of the components the parser knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Delimiter {
    #[display("BEGIN:VCALENDAR")]
    BeginVCalendar,
    #[display("END:VCALENDAR")]
    EndVCalendar,
    #[display("BEGIN:VEVENT")]
    BeginVEvent,
    #[display("END:VEVENT")]
    EndVEvent,
    #[display("BEGIN:VALARM")]
    BeginVAlarm,
    #[display("END:VALARM")]
    EndVAlarm,
}

/// Literal line prefixes recognised as delimiters.
///
/// None of the keys is a prefix of another, so lookup order is irrelevant.
pub(crate) static DELIMITERS: phf::Map<&'static str, Delimiter> = phf::phf_map! {
    "BEGIN:VCALENDAR" => Delimiter::BeginVCalendar,
    "END:VCALENDAR" => Delimiter::EndVCalendar,
    "BEGIN:VEVENT" => Delimiter::BeginVEvent,
    "END:VEVENT" => Delimiter::EndVEvent,
    "BEGIN:VALARM" => Delimiter::BeginVAlarm,
    "END:VALARM" => Delimiter::EndVAlarm,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A structural BEGIN/END line.
    Delimiter(Delimiter),
    /// Property name, or the name of a component the lexer has no literal for.
    Name,
    LineEnd,
    Colon,
    SemiColon,
    Equal,
    Comma,
    ParamName,
    ParamValue,
    Value,
    Eof,
}

/// A lexed slice of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Byte offset of the token in the unfolded input.
    pub pos: usize,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, pos: usize, text: &'a str) -> Self {
        Self { kind, pos, text }
    }

    pub fn eof(pos: usize) -> Self {
        Self::new(TokenKind::Eof, pos, "")
    }

    pub fn delimiter(&self) -> Option<Delimiter> {
        match self.kind {
            TokenKind::Delimiter(delimiter) => Some(delimiter),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Delimiter(delimiter) => write!(f, "<{delimiter}>"),
            _ => write!(f, "{:?}", self.text),
        }
    }
}
