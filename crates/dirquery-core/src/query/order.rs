use crate::{config::ConfigError, directory::OrderDirection};

///
/// OrderBy
///
/// Attribute → direction mapping with unique keys. Re-inserting a key
/// replaces its direction in place (last write wins).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderBy {
    fields: Vec<(String, OrderDirection)>,
}

impl OrderBy {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build from string directions, canonicalizing each one.
    ///
    /// Fails on the first invalid direction; nothing built so far escapes.
    pub fn parse<I, K, D>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: AsRef<str>,
    {
        let mut order = Self::new();

        for (attribute, direction) in pairs {
            let attribute = attribute.into();
            let direction = direction.as_ref();
            let parsed = direction.parse::<OrderDirection>().map_err(|_| {
                ConfigError::InvalidOrderDirection {
                    attribute: attribute.clone(),
                    value: direction.to_string(),
                }
            })?;

            order.insert(attribute, parsed);
        }

        Ok(order)
    }

    pub fn insert(&mut self, attribute: impl Into<String>, direction: OrderDirection) {
        let attribute = attribute.into();

        match self.fields.iter_mut().find(|(key, _)| *key == attribute) {
            Some((_, existing)) => *existing = direction,
            None => self.fields.push((attribute, direction)),
        }
    }

    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, direction: OrderDirection) -> Self {
        self.insert(attribute, direction);
        self
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<OrderDirection> {
        self.fields
            .iter()
            .find(|(key, _)| key == attribute)
            .map(|(_, direction)| *direction)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, OrderDirection)> {
        self.fields
            .iter()
            .map(|(key, direction)| (key.as_str(), *direction))
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, OrderDirection)> for OrderBy {
    fn from_iter<T: IntoIterator<Item = (String, OrderDirection)>>(iter: T) -> Self {
        let mut order = Self::new();
        for (attribute, direction) in iter {
            order.insert(attribute, direction);
        }
        order
    }
}
