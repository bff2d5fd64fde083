use std::ops::ControlFlow;

use crate::{
    ParserError,
    component::{
        AlarmBuilder, BuildContext, Calendar, CalendarBuilder, Component, ComponentMut,
        EventBuilder,
    },
    parser::{Delimiter, Lexer, ParserOptions, Token, TokenKind},
    property::{Param, Property},
};

/// The open block whose properties are being collected, together with
/// the builders of everything that is still open.
#[derive(Debug, Default)]
enum Scope {
    #[default]
    Calendar,
    Event(EventBuilder),
    Alarm {
        event: EventBuilder,
        alarm: AlarmBuilder,
    },
}

impl Scope {
    fn name(&self) -> &'static str {
        match self {
            Self::Calendar => CalendarBuilder::NAME,
            Self::Event(_) => EventBuilder::NAME,
            Self::Alarm { .. } => AlarmBuilder::NAME,
        }
    }

    fn expected_end(&self) -> &'static str {
        match self {
            Self::Calendar => "END:VCALENDAR",
            Self::Event(_) => "END:VEVENT",
            Self::Alarm { .. } => "END:VALARM",
        }
    }
}

fn unexpected(found: &Token, expected: &'static str) -> ParserError {
    ParserError::Unexpected {
        found: found.to_string(),
        expected,
    }
}

/// Recursive descent over the tokens of a [`Lexer`].
///
/// The input must already be unfolded, see [`crate::parser::unfold`].
pub struct CalendarParser<'a> {
    lexer: Lexer<'a>,
    /// One token of pushback.
    peeked: Option<Token<'a>>,
    scope: Scope,
    calendar: CalendarBuilder,
    /// METHOD of the calendar as of the last BEGIN:VEVENT.
    method: Option<String>,
    options: ParserOptions,
}

impl<'a> CalendarParser<'a> {
    pub fn new(input: &'a str) -> Self {
        CalendarParser {
            lexer: Lexer::new(input),
            peeked: None,
            scope: Scope::Calendar,
            calendar: CalendarBuilder::new(),
            method: None,
            options: Default::default(),
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a single VCALENDAR block. Anything after its END line is
    /// ignored.
    pub fn parse(mut self) -> Result<Calendar, ParserError> {
        self.expect(
            TokenKind::Delimiter(Delimiter::BeginVCalendar),
            "BEGIN:VCALENDAR",
        )?;
        self.expect(TokenKind::LineEnd, "CRLF")?;

        while self.scan_content_line()?.is_continue() {}

        let context = BuildContext::new(&self.options, self.method.as_deref());
        let calendar = self.calendar.build(&context)?;
        tracing::debug!(
            events = calendar.events.len(),
            properties = calendar.properties.len(),
            "Calendar parsed"
        );
        Ok(calendar)
    }

    fn next_token(&mut self) -> Result<Token<'a>, ParserError> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        let token = match self.lexer.next() {
            Some(token) => token?,
            None => Token::eof(self.lexer.position()),
        };
        tracing::trace!(kind = ?token.kind, pos = token.pos, text = token.text);
        Ok(token)
    }

    /// Push `token` back, the next call to `next_token` returns it again.
    fn backup(&mut self, token: Token<'a>) {
        debug_assert!(self.peeked.is_none(), "only one token of pushback");
        self.peeked = Some(token);
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token<'a>, ParserError> {
        let token = self.next_token()?;
        if token.kind != kind {
            return Err(unexpected(&token, expected));
        }
        Ok(token)
    }

    /// Parse one content line into the component of the current scope.
    /// Breaks once END:VCALENDAR has been consumed.
    fn scan_content_line(&mut self) -> Result<ControlFlow<()>, ParserError> {
        let name = self.next_token()?;
        if let Some(delimiter) = name.delimiter() {
            return self.scan_delimiter(&name, delimiter);
        }
        if name.kind != TokenKind::Name || name.text.is_empty() {
            return Err(unexpected(&name, "a property name"));
        }

        let mut property = Property::new(name.text);
        self.scan_params(&mut property)?;
        self.expect(TokenKind::Colon, "\":\"")?;
        property.value = self.expect(TokenKind::Value, "a value")?.text.to_owned();
        self.expect(TokenKind::LineEnd, "CRLF")?;

        match &mut self.scope {
            Scope::Calendar => self.calendar.add_property(property),
            Scope::Event(event) => event.add_property(property),
            Scope::Alarm { alarm, .. } => alarm.add_property(property),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Switch scope on a BEGIN/END line, verifying the component that
    /// closes.
    fn scan_delimiter(
        &mut self,
        token: &Token<'a>,
        delimiter: Delimiter,
    ) -> Result<ControlFlow<()>, ParserError> {
        let scope = std::mem::take(&mut self.scope);
        self.scope = match (delimiter, scope) {
            (Delimiter::BeginVEvent, Scope::Calendar) => {
                let header = self.calendar.validate_header()?;
                self.method = header.method;
                Scope::Event(EventBuilder::new())
            }
            (Delimiter::EndVEvent, Scope::Event(event)) => {
                let context = BuildContext::new(&self.options, self.method.as_deref());
                let event = event.build(&context)?;
                self.calendar.events.push(event);
                Scope::Calendar
            }
            (Delimiter::BeginVAlarm, Scope::Event(event)) => Scope::Alarm {
                event,
                alarm: AlarmBuilder::new(),
            },
            (Delimiter::EndVAlarm, Scope::Alarm { mut event, alarm }) => {
                let context = BuildContext::new(&self.options, self.method.as_deref());
                event.add_alarm(alarm.build(&context)?);
                Scope::Event(event)
            }
            (Delimiter::EndVCalendar, Scope::Calendar) => return Ok(ControlFlow::Break(())),
            (_, scope) => return Err(unexpected(token, scope.expected_end())),
        };
        tracing::debug!(%delimiter, scope = self.scope.name(), "Switched scope");

        self.expect(TokenKind::LineEnd, "CRLF")?;
        Ok(ControlFlow::Continue(()))
    }

    /// Parse `;name=value[,value]...` groups until something else shows up.
    fn scan_params(&mut self, property: &mut Property) -> Result<(), ParserError> {
        loop {
            let token = self.next_token()?;
            if token.kind != TokenKind::SemiColon {
                self.backup(token);
                return Ok(());
            }
            let name = self.expect(TokenKind::ParamName, "a parameter name")?;
            self.expect(TokenKind::Equal, "\"=\"")?;
            let param = self.scan_values()?;
            property.params.insert(name.text.to_owned(), param);
        }
    }

    fn scan_values(&mut self) -> Result<Param, ParserError> {
        let mut param = Param::new();
        loop {
            let value = self.expect(TokenKind::ParamValue, "a parameter value")?;
            param.values.push(value.text.to_owned());
            let token = self.next_token()?;
            if token.kind != TokenKind::Comma {
                self.backup(token);
                return Ok(param);
            }
        }
    }
}
