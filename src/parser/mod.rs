mod error;
pub use error::ParserError;

mod line;
pub use line::unfold;

mod token;
pub use token::{Delimiter, Token, TokenKind};

mod lexer;
pub use lexer::{Found, Lexer, LexerError};

mod component;
pub use component::CalendarParser;

use crate::{component::Calendar, types::Tz};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Zone for date-times that have neither a UTC marker nor a TZID, and
    /// for bare dates. `Tz::Local`, the default, is the zone of the host.
    pub default_timezone: Tz,
    /// Reject events whose DTSTAMP, DTSTART or DTEND cannot be parsed
    /// instead of treating those properties as absent.
    pub strict_dates: bool,
}

/// Parse a complete iCalendar resource with default options.
pub fn parse(input: &str) -> Result<Calendar, ParserError> {
    parse_with_options(input, ParserOptions::default())
}

/// Unfold `input` and parse the VCALENDAR it starts with.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_with_options(input: &str, options: ParserOptions) -> Result<Calendar, ParserError> {
    let unfolded = unfold(input);
    CalendarParser::new(&unfolded)
        .with_options(options)
        .parse()
        .inspect_err(|err| tracing::debug!(error = %err, "Failed to parse calendar"))
}
