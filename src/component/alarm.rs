use crate::{
    ParserError,
    component::{BuildContext, Component, ComponentMut},
    property::Property,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub action: String,
    pub trigger: String,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, Default)]
pub struct AlarmBuilder {
    pub properties: Vec<Property>,
}

impl AlarmBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for Alarm {
    const NAME: &'static str = "VALARM";

    fn get_properties(&self) -> &[Property] {
        &self.properties
    }
}

impl Component for AlarmBuilder {
    const NAME: &'static str = "VALARM";

    fn get_properties(&self) -> &[Property] {
        &self.properties
    }
}

impl ComponentMut for AlarmBuilder {
    type Verified = Alarm;

    fn get_properties_mut(&mut self) -> &mut Vec<Property> {
        &mut self.properties
    }

    fn build(self, _context: &BuildContext<'_>) -> Result<Alarm, ParserError> {
        // REQUIRED, but ONLY ONCE
        let counts = self.count_properties(&["ACTION", "TRIGGER"]);
        for name in ["ACTION", "TRIGGER"] {
            match counts.get(name) {
                None => return Err(ParserError::MissingProperty(name)),
                Some(1) => {}
                Some(_) => return Err(ParserError::DuplicateProperty(name)),
            }
        }

        let value = |name| {
            self.get_property(name)
                .map(|prop: &Property| prop.value.to_owned())
                .unwrap_or_default()
        };
        Ok(Alarm {
            action: value("ACTION"),
            trigger: value("TRIGGER"),
            properties: self.properties,
        })
    }
}
