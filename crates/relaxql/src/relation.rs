//! Relation kinds and the forward/inverse dispatch table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseRelationKindError;

/// The shape of an association between two models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    /// One-to-many relationship (hasMany)
    HasMany,
    /// One-to-one relationship (hasOne)
    HasOne,
    /// Many-to-one relationship (belongsTo)
    BelongsTo,
    /// Many-to-many relationship through a join model
    BelongsToMany,
}

impl RelationKind {
    /// All relation kinds, in declaration order
    pub const ALL: [RelationKind; 4] = [
        RelationKind::HasMany,
        RelationKind::HasOne,
        RelationKind::BelongsTo,
        RelationKind::BelongsToMany,
    ];

    /// The registration registered on the target when the inverse is derived.
    ///
    /// `BelongsTo` inverts to `HasMany`, not `HasOne`. This is a heuristic
    /// favouring the common one-to-many shape and is not always correct: a
    /// true one-to-one inverse must be declared with `inverse = false` and
    /// registered separately.
    pub fn inverse(self) -> RelationKind {
        match self {
            RelationKind::HasMany => RelationKind::BelongsTo,
            RelationKind::HasOne => RelationKind::BelongsTo,
            RelationKind::BelongsTo => RelationKind::HasMany,
            RelationKind::BelongsToMany => RelationKind::BelongsToMany,
        }
    }

    /// Returns true if this relation needs a through model
    pub fn requires_through(self) -> bool {
        matches!(self, RelationKind::BelongsToMany)
    }

    /// Returns true if the owning side sees a collection
    pub fn is_collection(self) -> bool {
        matches!(self, RelationKind::HasMany | RelationKind::BelongsToMany)
    }

    /// The ORM method name, as used in diagnostics (`hasMany`, `belongsTo`, ...)
    pub fn method_name(self) -> &'static str {
        match self {
            RelationKind::HasMany => "hasMany",
            RelationKind::HasOne => "hasOne",
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::BelongsToMany => "belongsToMany",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

impl FromStr for RelationKind {
    type Err = ParseRelationKindError;

    /// Accepts exactly the four ORM method names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hasMany" => Ok(RelationKind::HasMany),
            "hasOne" => Ok(RelationKind::HasOne),
            "belongsTo" => Ok(RelationKind::BelongsTo),
            "belongsToMany" => Ok(RelationKind::BelongsToMany),
            other => Err(ParseRelationKindError(other.to_string())),
        }
    }
}

/// A relation kind as the caller supplied it: typed, or as a raw tag that
/// still has to be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindSpec {
    Typed(RelationKind),
    Tag(String),
}

impl KindSpec {
    /// Resolve to a relation kind
    pub fn resolve(&self) -> Result<RelationKind, ParseRelationKindError> {
        match self {
            KindSpec::Typed(kind) => Ok(*kind),
            KindSpec::Tag(tag) => tag.parse(),
        }
    }

    /// Returns true for an empty or whitespace-only tag, which counts as no kind at all
    pub fn is_blank(&self) -> bool {
        matches!(self, KindSpec::Tag(tag) if tag.trim().is_empty())
    }
}

impl From<RelationKind> for KindSpec {
    fn from(kind: RelationKind) -> Self {
        KindSpec::Typed(kind)
    }
}

impl From<&str> for KindSpec {
    fn from(tag: &str) -> Self {
        KindSpec::Tag(tag.to_string())
    }
}

impl From<String> for KindSpec {
    fn from(tag: String) -> Self {
        KindSpec::Tag(tag)
    }
}
