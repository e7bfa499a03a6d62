//! Association options passed through to the ORM

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the ORM reads the foreign key column
pub const FOREIGN_KEY: &str = "foreignKey";

/// Key under which the ORM reads the join model of a many-to-many association
pub const THROUGH: &str = "through";

/// Key under which the ORM reads an explicit association name
pub const ALIAS: &str = "as";

/// Free-form association options (`onDelete`, `hooks`, `as`, ...).
///
/// The mapping is handed to the ORM verbatim. A `foreignKey` or `through`
/// entry set here takes precedence over the request's own foreign key or
/// through model, the same way a caller-supplied option overrides a derived one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssociationOptions(Map<String, Value>);

impl AssociationOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an option, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Get an option by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the option is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The `foreignKey` option, when it is a string
    pub fn foreign_key(&self) -> Option<&str> {
        self.get(FOREIGN_KEY).and_then(Value::as_str)
    }

    /// The `through` option, when it is a string (a join table or model name)
    pub fn through(&self) -> Option<&str> {
        self.get(THROUGH).and_then(Value::as_str)
    }

    /// The `as` option, when it is a string
    pub fn alias(&self) -> Option<&str> {
        self.get(ALIAS).and_then(Value::as_str)
    }

    /// Effective foreign key: the `foreignKey` option wins over `fallback`
    pub fn resolve_foreign_key<'a>(&'a self, fallback: Option<&'a str>) -> Option<&'a str> {
        self.foreign_key().or(fallback)
    }

    /// Effective through name: the `through` option wins over `fallback`
    pub fn resolve_through<'a>(&'a self, fallback: Option<&'a str>) -> Option<&'a str> {
        self.through().or(fallback)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over options
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for AssociationOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AssociationOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
