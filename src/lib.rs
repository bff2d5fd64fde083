//! Streaming iCalendar lexer and validating parser.
//!
//! The input is unfolded, split into tokens by [`parser::Lexer`] and
//! assembled into a [`Calendar`] of events and alarms by
//! [`parser::CalendarParser`], which validates every component as it
//! closes.
//!
//! # Examples
//!
//! ```rust
//! let input = "BEGIN:VCALENDAR\r\n\
//!     PRODID:-//Example//EN\r\n\
//!     VERSION:2.0\r\n\
//!     BEGIN:VEVENT\r\n\
//!     UID:1@example.com\r\n\
//!     DTSTAMP:20230601T080000Z\r\n\
//!     DTSTART:20230615T120000Z\r\n\
//!     SUMMARY:Team\r\n  lunch\r\n\
//!     END:VEVENT\r\n\
//!     END:VCALENDAR\r\n";
//!
//! let cal = icalstream::parse(input).unwrap();
//! assert_eq!(cal.events[0].summary, "Team lunch");
//! ```

const CRLF: &str = "\r\n";
const PARAM_VALUE_DELIMITER: char = ',';
const VALUE_DELIMITER: char = ':';
const PARAM_DELIMITER: char = ';';
const PARAM_NAME_DELIMITER: char = '=';
const PARAM_QUOTE: char = '"';

pub mod component;
pub use component::{Alarm, Calendar, Event};

pub mod parser;
pub use parser::{CalendarParser, ParserError, ParserOptions, parse, parse_with_options};

pub mod property;
pub use property::{Param, Property};

pub mod types;
