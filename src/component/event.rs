use chrono::{DateTime, TimeDelta};

use crate::{
    ParserError,
    component::{Alarm, BuildContext, Component, ComponentMut},
    property::Property,
    types::Tz,
};

/// Properties that may occur at most once in an event.
const SINGLE_PROPERTIES: [&str; 7] = [
    "UID",
    "DTSTAMP",
    "DTSTART",
    "DTEND",
    "DURATION",
    "SUMMARY",
    "DESCRIPTION",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub uid: String,
    /// `None` when DTSTAMP is absent or could not be parsed.
    pub dtstamp: Option<DateTime<Tz>>,
    pub dtstart: DateTime<Tz>,
    /// DTEND, or DTSTART plus one day when there is no DTEND. `None` when
    /// DTEND could not be parsed.
    pub dtend: Option<DateTime<Tz>>,
    pub summary: String,
    pub description: String,
    pub properties: Vec<Property>,
    pub alarms: Vec<Alarm>,
}

#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    pub properties: Vec<Property>,
    pub alarms: Vec<Alarm>,
}

impl Event {
    pub fn get_alarms(&self) -> &[Alarm] {
        &self.alarms
    }
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_alarm(&mut self, alarm: Alarm) {
        self.alarms.push(alarm);
    }

    fn get_date(
        &self,
        name: &'static str,
        context: &BuildContext<'_>,
    ) -> Result<Option<DateTime<Tz>>, ParserError> {
        match self.get_last_property(name) {
            Some(prop) => context.parse_date(name, prop),
            None => Ok(None),
        }
    }

    fn get_text(&self, name: &str) -> String {
        self.get_last_property(name)
            .map(|prop| prop.value.to_owned())
            .unwrap_or_default()
    }
}

impl Component for Event {
    const NAME: &'static str = "VEVENT";

    fn get_properties(&self) -> &[Property] {
        &self.properties
    }
}

impl Component for EventBuilder {
    const NAME: &'static str = "VEVENT";

    fn get_properties(&self) -> &[Property] {
        &self.properties
    }
}

impl ComponentMut for EventBuilder {
    type Verified = Event;

    fn get_properties_mut(&mut self) -> &mut Vec<Property> {
        &mut self.properties
    }

    fn build(self, context: &BuildContext<'_>) -> Result<Event, ParserError> {
        let counts = self.count_properties(&SINGLE_PROPERTIES);

        // OPTIONAL, but MUTUALLY EXCLUSIVE
        if counts.contains_key("DTEND") && counts.contains_key("DURATION") {
            return Err(ParserError::PropertyConflict(
                "cannot have both \"DTEND\" and \"DURATION\"",
            ));
        }

        let dtstamp = self.get_date("DTSTAMP", context)?;
        let dtstart = self.get_date("DTSTART", context)?;
        let dtend = self.get_date("DTEND", context)?;

        // REQUIRED, DTSTAMP only when the calendar has no METHOD
        if context.method.is_none() && dtstamp.is_none() {
            return Err(ParserError::MissingProperty("DTSTAMP"));
        }
        let uid = self.get_text("UID");
        if uid.is_empty() {
            return Err(ParserError::MissingProperty("UID"));
        }
        let dtstart = dtstart.ok_or(ParserError::MissingProperty("DTSTART"))?;

        // ONLY ONCE
        if let Some(name) = SINGLE_PROPERTIES
            .into_iter()
            .find(|name| counts.get(name).is_some_and(|count| *count > 1))
        {
            return Err(ParserError::DuplicateProperty(name));
        }

        let dtend = if counts.contains_key("DTEND") {
            dtend
        } else {
            Some(dtstart + TimeDelta::hours(24))
        };

        Ok(Event {
            uid,
            dtstamp,
            dtstart,
            dtend,
            summary: self.get_text("SUMMARY"),
            description: self.get_text("DESCRIPTION"),
            properties: self.properties,
            alarms: self.alarms,
        })
    }
}
