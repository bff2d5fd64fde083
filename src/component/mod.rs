mod alarm;
pub use alarm::*;
mod calendar;
pub use calendar::*;
mod event;
pub use event::*;

use chrono::DateTime;
use itertools::Itertools;
use std::collections::HashMap;

use crate::{
    ParserError,
    parser::ParserOptions,
    property::Property,
    types::{Tz, parse_date_property},
};

/// An immutable interface for a calendar component.
/// This is also implemented by the builders.
pub trait Component {
    const NAME: &'static str;

    fn get_properties(&self) -> &[Property];

    fn get_property<'c>(&'c self, name: &str) -> Option<&'c Property> {
        self.get_properties().iter().find(|p| p.name == name)
    }

    /// The last property called `name`, the one that wins when a
    /// property is repeated.
    fn get_last_property<'c>(&'c self, name: &str) -> Option<&'c Property> {
        self.get_properties().iter().rfind(|p| p.name == name)
    }

    fn get_named_properties<'c>(&'c self, name: &'c str) -> impl Iterator<Item = &'c Property> {
        self.get_properties().iter().filter(move |p| p.name == name)
    }

    /// Count the occurrences of each of `names`. Names that do not occur
    /// are absent from the map.
    fn count_properties(&self, names: &[&'static str]) -> HashMap<&'static str, usize> {
        self.get_properties()
            .iter()
            .filter_map(|p| names.iter().find(|name| **name == p.name).copied())
            .counts()
    }
}

/// A component under construction.
///
/// Builders start out empty, collect properties while their BEGIN/END
/// block is open and are turned into the verified component once the
/// block closes.
pub trait ComponentMut: Component + Default {
    type Verified: Component;

    fn get_properties_mut(&mut self) -> &mut Vec<Property>;

    /// Add the given property.
    #[inline]
    fn add_property(&mut self, property: Property) {
        self.get_properties_mut().push(property);
    }

    fn build(self, context: &BuildContext<'_>) -> Result<Self::Verified, ParserError>;
}

/// What a builder needs to know about its surroundings.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub options: &'a ParserOptions,
    /// METHOD declared by the enclosing calendar.
    pub method: Option<&'a str>,
}

impl<'a> BuildContext<'a> {
    pub fn new(options: &'a ParserOptions, method: Option<&'a str>) -> Self {
        Self { options, method }
    }

    /// Parse a date property.
    ///
    /// Unparsable values yield `None` unless `strict_dates` is set.
    pub fn parse_date(
        &self,
        name: &'static str,
        prop: &Property,
    ) -> Result<Option<DateTime<Tz>>, ParserError> {
        match parse_date_property(prop, self.options.default_timezone) {
            Ok(dt) => Ok(Some(dt)),
            Err(err) if self.options.strict_dates => Err(ParserError::DateTime(name, err)),
            Err(err) => {
                tracing::warn!(property = name, value = %prop.value, error = %err, "Ignoring invalid date");
                Ok(None)
            }
        }
    }
}
