//! Association Registry - runtime storage behind the in-memory adapter

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use crate::error::AdapterError;
use crate::metadata::AssociationMetadata;
use crate::relation::RelationKind;

/// Thread-safe store of associations, shared by every [`InMemoryModel`](crate::InMemoryModel)
/// defined against it
#[derive(Debug, Clone, Default)]
pub struct AssociationRegistry {
    /// Map of model name -> association name -> metadata
    associations: Arc<DashMap<String, HashMap<String, AssociationMetadata>>>,

    /// Every successful registration, in call order
    history: Arc<Mutex<Vec<AssociationMetadata>>>,
}

impl AssociationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an association on its owning model.
    ///
    /// Fails if the owner already has an association with the same name.
    pub fn register(&self, metadata: AssociationMetadata) -> Result<(), AdapterError> {
        let mut model_associations = self
            .associations
            .entry(metadata.owner.clone())
            .or_insert_with(HashMap::new);

        if model_associations.contains_key(&metadata.name) {
            return Err(AdapterError::DuplicateAssociation {
                model: metadata.owner.clone(),
                name: metadata.name.clone(),
            });
        }

        tracing::trace!(
            target: "relaxql",
            "Registered {}.{}({}) as '{}'",
            metadata.owner,
            metadata.kind,
            metadata.related,
            metadata.name
        );

        model_associations.insert(metadata.name.clone(), metadata.clone());
        drop(model_associations);

        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(metadata);

        Ok(())
    }

    /// Get association metadata by model and association name
    pub fn get(&self, model_name: &str, association_name: &str) -> Option<AssociationMetadata> {
        self.associations
            .get(model_name)?
            .get(association_name)
            .cloned()
    }

    /// Check if an association exists
    pub fn has_association(&self, model_name: &str, association_name: &str) -> bool {
        self.associations
            .get(model_name)
            .map(|associations| associations.contains_key(association_name))
            .unwrap_or(false)
    }

    /// Get all association names for a model, sorted
    pub fn association_names(&self, model_name: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .associations
            .get(model_name)
            .map(|associations| associations.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Every registration made so far, in call order
    pub fn history(&self) -> Vec<AssociationMetadata> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Find associations on the related model that point back to this one
    pub fn find_inverses(&self, model_name: &str, association_name: &str) -> Vec<AssociationMetadata> {
        let Some(metadata) = self.get(model_name, association_name) else {
            return Vec::new();
        };

        let Some(related) = self.associations.get(&metadata.related) else {
            return Vec::new();
        };

        let mut inverses: Vec<AssociationMetadata> = related
            .values()
            .filter(|candidate| metadata.is_inverse_of(candidate))
            .cloned()
            .collect();
        inverses.sort_by(|a, b| a.name.cmp(&b.name));
        inverses
    }

    /// Get statistics about the registry
    pub fn stats(&self) -> RegistryStats {
        let mut kind_counts = HashMap::new();
        let mut total_associations = 0;

        for entry in self.associations.iter() {
            for metadata in entry.value().values() {
                *kind_counts.entry(metadata.kind).or_insert(0) += 1;
                total_associations += 1;
            }
        }

        RegistryStats {
            total_models: self.associations.len(),
            total_associations,
            kind_counts,
        }
    }

    /// Clear all registered associations
    pub fn clear(&self) {
        self.associations.clear();
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

/// Statistics about the association registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_models: usize,
    pub total_associations: usize,
    pub kind_counts: HashMap<RelationKind, usize>,
}

impl RegistryStats {
    /// Number of associations created by a given registration
    pub fn count(&self, kind: RelationKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }
}
