//! In-memory ORM adapter
//!
//! A minimal collaborator for tests and demos: each registration is recorded
//! as [`AssociationMetadata`] in a shared [`AssociationRegistry`]. Declaring
//! the same association name twice on a model is rejected, the way an ORM
//! rejects a clashing accessor.

use crate::error::AdapterError;
use crate::inflection::pluralize;
use crate::metadata::AssociationMetadata;
use crate::model::{resolve_model_name, AssociationModel};
use crate::options::AssociationOptions;
use crate::registry::AssociationRegistry;
use crate::relation::RelationKind;

/// A model definition living in an [`AssociationRegistry`]
#[derive(Debug, Clone)]
pub struct InMemoryModel {
    name: Option<String>,
    plural: Option<String>,
    registry: AssociationRegistry,
}

impl InMemoryModel {
    /// Define a named model; its plural name is derived from the name
    pub fn define(registry: &AssociationRegistry, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            plural: Some(pluralize(&name)),
            name: Some(name),
            registry: registry.clone(),
        }
    }

    /// Define a model known only by its pluralized name (e.g. a table-backed model)
    pub fn from_plural(registry: &AssociationRegistry, plural: impl Into<String>) -> Self {
        Self {
            name: None,
            plural: Some(plural.into()),
            registry: registry.clone(),
        }
    }

    /// The registry this model records into
    pub fn registry(&self) -> &AssociationRegistry {
        &self.registry
    }

    /// Resolved model name
    pub fn model_name(&self) -> Result<String, AdapterError> {
        resolve_model_name(self).ok_or(AdapterError::UnnamedModel)
    }

    /// Association names defined on this model, sorted
    pub fn associations(&self) -> Vec<String> {
        match self.model_name() {
            Ok(name) => self.registry.association_names(&name),
            Err(_) => Vec::new(),
        }
    }

    /// Metadata of one association on this model
    pub fn association(&self, name: &str) -> Option<AssociationMetadata> {
        self.registry.get(&self.model_name().ok()?, name)
    }

    fn record(
        &self,
        kind: RelationKind,
        target: &Self,
        through: Option<&Self>,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), AdapterError> {
        let mut metadata = AssociationMetadata::new(kind, self.model_name()?, target.model_name()?)
            .with_foreign_key(foreign_key)
            .with_options(options.clone());

        let through_name = through.map(Self::model_name).transpose()?;
        if let Some(through) = options.resolve_through(through_name.as_deref()) {
            metadata = metadata.with_through(through);
        }

        self.registry.register(metadata)
    }
}

impl AssociationModel for InMemoryModel {
    type Error = AdapterError;

    fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn plural_name(&self) -> Option<&str> {
        self.plural.as_deref()
    }

    fn register_has_many(
        &self,
        target: &Self,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Self::Error> {
        self.record(RelationKind::HasMany, target, None, foreign_key, options)
    }

    fn register_has_one(
        &self,
        target: &Self,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Self::Error> {
        self.record(RelationKind::HasOne, target, None, foreign_key, options)
    }

    fn register_belongs_to(
        &self,
        target: &Self,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Self::Error> {
        self.record(RelationKind::BelongsTo, target, None, foreign_key, options)
    }

    fn register_belongs_to_many(
        &self,
        target: &Self,
        through: &Self,
        foreign_key: Option<&str>,
        options: &AssociationOptions,
    ) -> Result<(), Self::Error> {
        self.record(RelationKind::BelongsToMany, target, Some(through), foreign_key, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_derives_plural() {
        let registry = AssociationRegistry::new();
        let category = InMemoryModel::define(&registry, "Category");
        assert_eq!(category.declared_name(), Some("Category"));
        assert_eq!(category.plural_name(), Some("Categories"));
    }

    #[test]
    fn test_plural_only_model_resolves_singular() {
        let registry = AssociationRegistry::new();
        let posts = InMemoryModel::from_plural(&registry, "Posts");
        assert_eq!(posts.model_name().unwrap(), "Post");
    }

    #[test]
    fn test_registration_records_metadata() {
        let registry = AssociationRegistry::new();
        let user = InMemoryModel::define(&registry, "User");
        let post = InMemoryModel::define(&registry, "Post");

        user.register_has_many(&post, Some("userId"), &AssociationOptions::new())
            .unwrap();

        let posts = user.association("posts").unwrap();
        assert_eq!(posts.kind, RelationKind::HasMany);
        assert_eq!(posts.related, "Post");
        assert_eq!(posts.foreign_key.as_deref(), Some("userId"));
        assert!(post.associations().is_empty());
    }

    #[test]
    fn test_through_model_is_recorded() {
        let registry = AssociationRegistry::new();
        let post = InMemoryModel::define(&registry, "Post");
        let tag = InMemoryModel::define(&registry, "Tag");
        let post_tag = InMemoryModel::define(&registry, "PostTag");

        post.register_belongs_to_many(&tag, &post_tag, None, &AssociationOptions::new())
            .unwrap();

        assert_eq!(post.association("tags").unwrap().through.as_deref(), Some("PostTag"));
    }

    #[test]
    fn test_through_option_overrides_through_model() {
        let registry = AssociationRegistry::new();
        let post = InMemoryModel::define(&registry, "Post");
        let tag = InMemoryModel::define(&registry, "Tag");
        let post_tag = InMemoryModel::define(&registry, "PostTag");

        let options = AssociationOptions::new().with(crate::options::THROUGH, "post_tags");
        post.register_belongs_to_many(&tag, &post_tag, None, &options)
            .unwrap();

        assert_eq!(post.association("tags").unwrap().through.as_deref(), Some("post_tags"));
    }
}
