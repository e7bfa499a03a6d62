//! Basic relaxql usage
//!
//! Declares `User hasMany Post` with a single call and lets relaxql add the
//! inverse `Post belongsTo User`. Run with `RUST_LOG=relaxql=debug` to see
//! every trace line.

use relaxql::{
    AssociationRegistry, Declarator, DeclaratorConfig, InMemoryModel, RelationKind,
    RelationRequest,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DeclaratorConfig::from_env()?;
    let declarator = Declarator::from_config(config);

    // 1. Define models
    let registry = AssociationRegistry::new();
    let user = InMemoryModel::define(&registry, "User");
    let post = InMemoryModel::define(&registry, "Post");

    // 2. User hasMany Post; the inverse Post belongsTo User comes for free
    declarator.declare(
        RelationRequest::between(&user, &post, RelationKind::HasMany)
            .with_foreign_key("userId")
            .with_option("onDelete", "CASCADE")
            .with_option("hooks", true)
            .with_inverse(true),
    )?;

    // 3. Inspect what the ORM now knows
    for model in [&user, &post] {
        let name = model.model_name()?;
        for association in model.associations() {
            if let Some(metadata) = model.association(&association) {
                println!(
                    "{}.{} -> {} ({}, foreign key: {})",
                    name,
                    association,
                    metadata.related,
                    metadata.kind,
                    metadata.foreign_key.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    Ok(())
}
