//! The ORM collaborator seam
//!
//! Anything that can register associations on a model definition implements
//! [`AssociationModel`]; the declarator never touches an ORM any other way.

use crate::inflection::singularize;
use crate::options::AssociationOptions;

/// A handle to a model definition owned by an external ORM.
///
/// Registration takes `&self`: the ORM owns and mutates its model
/// definitions, so adapters are expected to use interior mutability or to
/// forward to a shared schema object.
pub trait AssociationModel {
    /// Error raised by the ORM when a registration is rejected
    type Error;

    /// The name the model was declared with, if any
    fn declared_name(&self) -> Option<&str>;

    /// The model's internal pluralized name (`"Posts"`), if any
    fn plural_name(&self) -> Option<&str> {
        None
    }

    /// Register `self hasMany target`
    fn register_has_many(
        &self,
        target: &Self,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Self::Error>;

    /// Register `self hasOne target`
    fn register_has_one(
        &self,
        target: &Self,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Self::Error>;

    /// Register `self belongsTo target`
    fn register_belongs_to(
        &self,
        target: &Self,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Self::Error>;

    /// Register `self belongsToMany target` through a join model.
    ///
    /// A string `through` entry in `options` names the join table in place of
    /// `through`'s own name.
    fn register_belongs_to_many(
        &self,
        target: &Self,
        through: &Self,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Self::Error>;
}

/// Resolve a model's display name: its declared name, else the singular form
/// of its pluralized internal name.
pub fn resolve_model_name<M: AssociationModel + ?Sized>(model: &M) -> Option<String> {
    match model.declared_name() {
        Some(name) => Some(name.to_string()),
        None => model.plural_name().map(singularize),
    }
}
