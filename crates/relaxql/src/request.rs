//! Relation declaration requests

use crate::error::RelaxError;
use crate::options::AssociationOptions;
use crate::relation::{KindSpec, RelationKind};

/// A single relation declaration, built by the caller and consumed by
/// [`Declarator::declare`](crate::Declarator::declare).
///
/// Every field is optional at construction time; missing pieces are reported
/// as [`RelaxError::InvalidRequest`] when the request is declared, before any
/// model is touched.
#[derive(Debug)]
pub struct RelationRequest<'a, M> {
    source: Option<&'a M>,
    target: Option<&'a M>,
    kind: Option<KindSpec>,
    foreign_key: Option<String>,
    through: Option<&'a M>,
    options: AssociationOptions,
    inverse: Option<bool>,
}

impl<'a, M> Default for RelationRequest<'a, M> {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
            kind: None,
            foreign_key: None,
            through: None,
            options: AssociationOptions::default(),
            inverse: None,
        }
    }
}

impl<'a, M> RelationRequest<'a, M> {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a request with source, target and kind set
    pub fn between(source: &'a M, target: &'a M, kind: impl Into<KindSpec>) -> Self {
        Self::new().with_source(source).with_target(target).with_kind(kind)
    }

    pub fn with_source(mut self, source: &'a M) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_target(mut self, target: &'a M) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the relation kind, typed or as a tag such as `"hasMany"`
    pub fn with_kind(mut self, kind: impl Into<KindSpec>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    /// Set the join model of a many-to-many relation
    pub fn with_through(mut self, through: &'a M) -> Self {
        self.through = Some(through);
        self
    }

    pub fn with_options(mut self, options: AssociationOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a single option
    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.options.insert(key, value);
        self
    }

    /// Whether to also register the inverse relation on the target
    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = Some(inverse);
        self
    }

    pub fn foreign_key(&self) -> Option<&str> {
        self.foreign_key.as_deref()
    }

    pub fn options(&self) -> &AssociationOptions {
        &self.options
    }

    /// The explicit inverse flag, if the caller set one
    pub fn inverse(&self) -> Option<bool> {
        self.inverse
    }

    /// Check the request and resolve it into the calls it will make.
    ///
    /// `inverse_by_default` applies when the request leaves `inverse` unset.
    pub fn plan<E>(self, inverse_by_default: bool) -> Result<DeclarationPlan<'a, M>, RelaxError<E>> {
        let mut missing = Vec::new();
        if self.source.is_none() {
            missing.push("source");
        }
        if self.target.is_none() {
            missing.push("target");
        }
        if self.kind.as_ref().map_or(true, KindSpec::is_blank) {
            missing.push("type");
        }

        let kind = self.kind.filter(|kind| !kind.is_blank());
        let (Some(source), Some(target), Some(kind)) = (self.source, self.target, kind) else {
            return Err(RelaxError::invalid_request(format!(
                "{} required",
                missing.join(", ")
            )));
        };

        let kind = kind.resolve()?;
        let register_inverse = self.inverse.unwrap_or(inverse_by_default);

        let (forward, inverse) = match kind {
            RelationKind::HasMany => (Registration::HasMany, Registration::BelongsTo),
            RelationKind::HasOne => (Registration::HasOne, Registration::BelongsTo),
            RelationKind::BelongsTo => (Registration::BelongsTo, Registration::HasMany),
            RelationKind::BelongsToMany => {
                let Some(through) = self.through else {
                    return Err(RelaxError::invalid_request(
                        "Through model is required for belongsToMany",
                    ));
                };
                (
                    Registration::BelongsToMany { through },
                    Registration::BelongsToMany { through },
                )
            }
        };
        debug_assert_eq!(inverse.kind(), kind.inverse());

        // The many-to-many inverse is registered without the foreign key.
        let inverse_foreign_key = match kind {
            RelationKind::BelongsToMany => None,
            _ => self.foreign_key.clone(),
        };

        Ok(DeclarationPlan {
            kind,
            forward: Step {
                owner: source,
                other: target,
                registration: forward,
                foreign_key: self.foreign_key,
            },
            inverse: register_inverse.then_some(Step {
                owner: target,
                other: source,
                registration: inverse,
                foreign_key: inverse_foreign_key,
            }),
            options: self.options,
        })
    }
}

/// A registration capability of the ORM, with the join model when it needs one
#[derive(Debug)]
pub enum Registration<'a, M> {
    HasMany,
    HasOne,
    BelongsTo,
    BelongsToMany { through: &'a M },
}

impl<'a, M> Clone for Registration<'a, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M> Copy for Registration<'a, M> {}

impl<'a, M> Registration<'a, M> {
    /// The relation kind this registration creates
    pub fn kind(&self) -> RelationKind {
        match self {
            Registration::HasMany => RelationKind::HasMany,
            Registration::HasOne => RelationKind::HasOne,
            Registration::BelongsTo => RelationKind::BelongsTo,
            Registration::BelongsToMany { .. } => RelationKind::BelongsToMany,
        }
    }
}

/// One registration call: `owner.<registration>(other, foreign_key, options)`
#[derive(Debug)]
pub struct Step<'a, M> {
    pub owner: &'a M,
    pub other: &'a M,
    pub registration: Registration<'a, M>,
    pub foreign_key: Option<String>,
}

/// A validated request, resolved into its forward and optional inverse calls
#[derive(Debug)]
pub struct DeclarationPlan<'a, M> {
    pub kind: RelationKind,
    pub forward: Step<'a, M>,
    pub inverse: Option<Step<'a, M>>,
    pub options: AssociationOptions,
}
