use crate::{
    ParserError,
    component::{BuildContext, Component, ComponentMut, Event},
    property::Property,
};

pub const DEFAULT_CALSCALE: &str = "GREGORIAN";

#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    pub prodid: String,
    pub version: String,
    pub calscale: String,
    pub method: Option<String>,
    pub properties: Vec<Property>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default)]
pub struct CalendarBuilder {
    pub properties: Vec<Property>,
    pub events: Vec<Event>,
}

/// The calendar level properties the parser interprets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarHeader {
    pub prodid: String,
    pub version: String,
    pub calscale: String,
    pub method: Option<String>,
}

impl CalendarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the calendar level properties seen so far.
    ///
    /// PRODID and VERSION are required exactly once. CALSCALE and METHOD
    /// are optional, the last occurrence wins.
    pub fn validate_header(&self) -> Result<CalendarHeader, ParserError> {
        let counts = self.count_properties(&["PRODID", "VERSION"]);
        for name in ["PRODID", "VERSION"] {
            match counts.get(name) {
                None => return Err(ParserError::MissingProperty(name)),
                Some(1) => {}
                Some(_) => return Err(ParserError::DuplicateProperty(name)),
            }
        }

        let value = |name| {
            self.get_last_property(name)
                .map(|prop: &Property| prop.value.to_owned())
        };
        Ok(CalendarHeader {
            prodid: value("PRODID").unwrap_or_default(),
            version: value("VERSION").unwrap_or_default(),
            calscale: value("CALSCALE").unwrap_or_else(|| DEFAULT_CALSCALE.to_owned()),
            method: value("METHOD").filter(|method| !method.is_empty()),
        })
    }
}

impl Component for Calendar {
    const NAME: &'static str = "VCALENDAR";

    fn get_properties(&self) -> &[Property] {
        &self.properties
    }
}

impl Component for CalendarBuilder {
    const NAME: &'static str = "VCALENDAR";

    fn get_properties(&self) -> &[Property] {
        &self.properties
    }
}

impl ComponentMut for CalendarBuilder {
    type Verified = Calendar;

    fn get_properties_mut(&mut self) -> &mut Vec<Property> {
        &mut self.properties
    }

    fn build(self, _context: &BuildContext<'_>) -> Result<Calendar, ParserError> {
        let CalendarHeader {
            prodid,
            version,
            calscale,
            method,
        } = self.validate_header()?;

        Ok(Calendar {
            prodid,
            version,
            calscale,
            method,
            properties: self.properties,
            events: self.events,
        })
    }
}
