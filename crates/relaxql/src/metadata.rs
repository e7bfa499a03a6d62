//! Association Metadata - what the in-memory adapter records per registration

use serde::{Deserialize, Serialize};

use crate::inflection::{lower_first, pluralize};
use crate::options::AssociationOptions;
use crate::relation::RelationKind;

/// One association registered on a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationMetadata {
    /// The registration that created this association
    pub kind: RelationKind,

    /// Name of the model owning the association
    pub owner: String,

    /// Name of the associated model
    pub related: String,

    /// Accessor name of the association (`posts`, `user`, ...)
    pub name: String,

    /// Foreign key column, when one was given
    pub foreign_key: Option<String>,

    /// Join model name for many-to-many associations
    pub through: Option<String>,

    /// Options passed with the registration
    pub options: AssociationOptions,
}

impl AssociationMetadata {
    /// Create metadata with the conventional association name
    pub fn new(kind: RelationKind, owner: impl Into<String>, related: impl Into<String>) -> Self {
        let related = related.into();
        Self {
            name: conventional_name(kind, &related),
            kind,
            owner: owner.into(),
            related,
            foreign_key: None,
            through: None,
            options: AssociationOptions::default(),
        }
    }

    /// Set the foreign key
    pub fn with_foreign_key(mut self, foreign_key: Option<&str>) -> Self {
        self.foreign_key = foreign_key.map(str::to_string);
        self
    }

    /// Set the join model
    pub fn with_through(mut self, through: impl Into<String>) -> Self {
        self.through = Some(through.into());
        self
    }

    /// Set the options; an `as` option renames the association
    pub fn with_options(mut self, options: AssociationOptions) -> Self {
        if let Some(alias) = options.alias() {
            self.name = alias.to_string();
        }
        self.options = options;
        self
    }

    /// Returns true if `other` is the inverse side of this association
    pub fn is_inverse_of(&self, other: &AssociationMetadata) -> bool {
        if self.owner != other.related || self.related != other.owner {
            return false;
        }

        match (self.kind, other.kind) {
            (RelationKind::HasOne, RelationKind::BelongsTo)
            | (RelationKind::BelongsTo, RelationKind::HasOne)
            | (RelationKind::HasMany, RelationKind::BelongsTo)
            | (RelationKind::BelongsTo, RelationKind::HasMany) => {
                self.foreign_key == other.foreign_key
            }
            (RelationKind::BelongsToMany, RelationKind::BelongsToMany) => {
                self.through.is_some() && self.through == other.through
            }
            _ => false,
        }
    }
}

/// Accessor name an ORM would give the association: plural for collections
/// (`posts`), singular otherwise (`user`).
pub fn conventional_name(kind: RelationKind, related: &str) -> String {
    if kind.is_collection() {
        lower_first(&pluralize(related))
    } else {
        lower_first(related)
    }
}
