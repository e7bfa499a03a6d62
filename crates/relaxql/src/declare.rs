//! Relation Declarator - registers a relation and, optionally, its inverse
//!
//! Calls are made in a fixed order: the forward registration on the source,
//! then the inverse registration on the target. There is no rollback: if the
//! inverse call fails, the forward registration stays in effect and the
//! collaborator's error is returned.

use std::collections::HashMap;

use crate::config::DeclaratorConfig;
use crate::diagnostics::{DiagnosticSink, InverseDefined, TracingSink};
use crate::error::{RelaxError, RelaxResult};
use crate::manifest::RelationManifest;
use crate::model::{resolve_model_name, AssociationModel};
use crate::options::AssociationOptions;
use crate::request::{Registration, RelationRequest, Step};

/// Declare a relation with the default configuration, logging auto-defined
/// inverses through `tracing`.
pub fn declare_relation<M: AssociationModel>(
    request: RelationRequest<'_, M>,
) -> RelaxResult<(), M::Error> {
    Declarator::new().declare(request)
}

/// Declares relations against an ORM, reporting derived inverses to a sink
#[derive(Debug, Clone)]
pub struct Declarator<S = TracingSink> {
    sink: S,
    config: DeclaratorConfig,
}

impl Default for Declarator<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl Declarator<TracingSink> {
    /// Create a declarator with the default configuration
    pub fn new() -> Self {
        Self::from_config(DeclaratorConfig::default())
    }

    /// Create a declarator whose trace sink uses the configured prefix
    pub fn from_config(config: DeclaratorConfig) -> Self {
        Self {
            sink: TracingSink::new(config.trace_prefix.clone()),
            config,
        }
    }
}

impl<S: DiagnosticSink> Declarator<S> {
    /// Create a declarator reporting to a custom sink
    pub fn with_sink(sink: S, config: DeclaratorConfig) -> Self {
        Self { sink, config }
    }

    pub fn config(&self) -> &DeclaratorConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Declare one relation.
    ///
    /// The request is validated before any registration call. On success with
    /// an inverse, the sink receives one [`InverseDefined`] event. Errors from
    /// the ORM are returned as [`RelaxError::Collaborator`] without
    /// translation.
    pub fn declare<M: AssociationModel>(
        &self,
        request: RelationRequest<'_, M>,
    ) -> RelaxResult<(), M::Error> {
        let plan = request.plan::<M::Error>(self.config.inverse_by_default)?;

        register(&plan.forward, &plan.options).map_err(RelaxError::Collaborator)?;

        let source_name = resolve_model_name(plan.forward.owner);
        let target_name = resolve_model_name(plan.forward.other);

        let Some(inverse) = plan.inverse else {
            tracing::debug!(
                target: "relaxql",
                relation = %plan.kind,
                "Defined {}.{}({}) without inverse",
                source_name.as_deref().unwrap_or("?"),
                plan.kind,
                target_name.as_deref().unwrap_or("?"),
            );
            return Ok(());
        };

        register(&inverse, &plan.options).map_err(RelaxError::Collaborator)?;

        self.sink.inverse_defined(&InverseDefined {
            target: target_name,
            kind: inverse.registration.kind(),
            source: source_name,
        });

        Ok(())
    }

    /// Declare several relations in order, stopping at the first failure.
    ///
    /// Relations declared before the failure stay registered.
    pub fn declare_all<'a, M, I>(&self, requests: I) -> RelaxResult<(), M::Error>
    where
        M: AssociationModel + 'a,
        I: IntoIterator<Item = RelationRequest<'a, M>>,
    {
        for request in requests {
            self.declare(request)?;
        }
        Ok(())
    }

    /// Declare every relation of a manifest, looking models up by name.
    ///
    /// Unknown model names are reported before any relation of the manifest
    /// is declared.
    pub fn declare_manifest<M: AssociationModel>(
        &self,
        manifest: &RelationManifest,
        models: &HashMap<String, M>,
    ) -> RelaxResult<(), M::Error> {
        if let Some(missing) = manifest
            .model_names()
            .into_iter()
            .find(|name| !models.contains_key(*name))
        {
            return Err(RelaxError::UnknownModel(missing.to_string()));
        }

        let requests = manifest
            .relations
            .iter()
            .map(|entry| entry.to_request(models))
            .collect::<Result<Vec<_>, RelaxError<M::Error>>>()?;

        self.declare_all(requests)
    }
}

/// Make a single registration call on the owning model
fn register<M: AssociationModel>(
    step: &Step<'_, M>,
    options: &AssociationOptions,
) -> Result<(), M::Error> {
    let foreign_key = options.resolve_foreign_key(step.foreign_key.as_deref());

    match step.registration {
        Registration::HasMany => step.owner.register_has_many(step.other, foreign_key, options),
        Registration::HasOne => step.owner.register_has_one(step.other, foreign_key, options),
        Registration::BelongsTo => step.owner.register_belongs_to(step.other, foreign_key, options),
        Registration::BelongsToMany { through } => {
            step.owner
                .register_belongs_to_many(step.other, through, foreign_key, options)
        }
    }
}
