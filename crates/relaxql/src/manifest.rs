//! Relation manifests - relation declarations loaded from YAML or JSON
//!
//! ```yaml
//! relations:
//!   - source: User
//!     target: Post
//!     type: hasMany
//!     foreignKey: userId
//!     options:
//!       onDelete: CASCADE
//!   - source: Post
//!     target: Tag
//!     type: belongsToMany
//!     through: PostTag
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::error::RelaxError;
use crate::options::AssociationOptions;
use crate::request::RelationRequest;

/// One relation declaration, with models referenced by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEntry {
    pub source: String,
    pub target: String,
    /// Relation tag (`hasMany`, `hasOne`, `belongsTo`, `belongsToMany`)
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
    #[serde(default, skip_serializing_if = "AssociationOptions::is_empty")]
    pub options: AssociationOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<bool>,
}

impl RelationEntry {
    /// Build a request, resolving model names against `models`
    pub fn to_request<'m, M, E>(
        &self,
        models: &'m HashMap<String, M>,
    ) -> Result<RelationRequest<'m, M>, RelaxError<E>> {
        let lookup = move |name: &str| -> Result<&'m M, RelaxError<E>> {
            models
                .get(name)
                .ok_or_else(|| RelaxError::UnknownModel(name.to_string()))
        };

        let mut request = RelationRequest::between(
            lookup(self.source.as_str())?,
            lookup(self.target.as_str())?,
            self.kind.as_str(),
        )
        .with_options(self.options.clone());

        if let Some(ref foreign_key) = self.foreign_key {
            request = request.with_foreign_key(foreign_key.clone());
        }
        if let Some(ref through) = self.through {
            request = request.with_through(lookup(through.as_str())?);
        }
        if let Some(inverse) = self.inverse {
            request = request.with_inverse(inverse);
        }

        Ok(request)
    }
}

/// A list of relation declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationManifest {
    #[serde(default)]
    pub relations: Vec<RelationEntry>,
}

impl RelationManifest {
    /// Parse a manifest from YAML
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parse a manifest from JSON
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a manifest file, picking the format from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let manifest = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => {
                return Err(ConfigError::parsing_error(format!(
                    "Unsupported manifest format: {}",
                    path.display()
                )))
            }
        };

        tracing::debug!(
            target: "relaxql",
            "Loaded {} relation(s) from {}",
            manifest.relations.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Every model name the manifest references, in first-seen order
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.relations {
            let referenced = [Some(&entry.source), Some(&entry.target), entry.through.as_ref()];
            for name in referenced.into_iter().flatten() {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
        names
    }
}
