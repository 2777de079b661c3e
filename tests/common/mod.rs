//! Shared fixtures: one declared-statement factory bound to a test module.

#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use yangtree::base::{ModuleInterner, QName};
use yangtree::model::{
    BuildConfig, BuildError, DeclaredFactory, DeclaredStatement, EffectiveBuilder,
    EffectiveStatement,
};

pub const NAMESPACE: &str = "urn:yangtree:it";

static FACTORY: LazyLock<DeclaredFactory> = LazyLock::new(|| {
    let mut factory = DeclaredFactory::new(Arc::new(ModuleInterner::new()), NAMESPACE, None);
    factory.bind_prefix("ext", "urn:yangtree:extensions", None);
    factory
});

pub fn name(local: &str) -> QName {
    FACTORY.module().bind(local).unwrap()
}

/// Declare a statement with an argument.
pub fn stmt(keyword: &str, argument: &str, children: Vec<Arc<DeclaredStatement>>) -> Arc<DeclaredStatement> {
    FACTORY.stmt(keyword, Some(argument), children).unwrap()
}

/// Declare a statement without an argument.
pub fn bare(keyword: &str, children: Vec<Arc<DeclaredStatement>>) -> Arc<DeclaredStatement> {
    FACTORY.stmt(keyword, None, children).unwrap()
}

pub fn build(declared: &Arc<DeclaredStatement>) -> Result<EffectiveStatement, BuildError> {
    EffectiveBuilder::default().build(declared)
}

pub fn build_with(
    config: BuildConfig,
    declared: &Arc<DeclaredStatement>,
) -> Result<EffectiveStatement, BuildError> {
    EffectiveBuilder::new(config).build(declared)
}
