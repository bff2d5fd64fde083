//! Properties and parameters as they appear on a content line.
//!
//! No checks are made on the validity of names or values here, the
//! component builders decide which properties they care about.

use derive_more::{Deref, From, Into};
use std::collections::BTreeMap;
use std::fmt;

/// The values of a single parameter, in source order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, From, Into)]
pub struct Param {
    pub values: Vec<String>,
}

impl Param {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Parameters of a property keyed by name, case as written.
///
/// Inserting a name twice keeps the last value.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, From, Deref)]
pub struct Params(BTreeMap<String, Param>);

impl Params {
    #[inline]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Param::first)
    }

    #[inline]
    pub fn get_tzid(&self) -> Option<&str> {
        self.get_param("TZID")
    }

    #[inline]
    pub fn get_value_type(&self) -> Option<&str> {
        self.get_param("VALUE")
    }

    pub fn insert(&mut self, name: String, param: Param) {
        self.0.insert(name, param);
    }
}

/// A calendar property: `NAME;PARAM=a,b:value`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: String,
    /// Property parameters.
    pub params: Params,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "name: {}\nparams: {:?}\nvalue: {:?}",
            self.name, self.params, self.value
        )
    }
}
