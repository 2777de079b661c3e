//! Statement constructors for unit tests.
//!
//! Every helper builds one statement from already-built children through
//! [`EffectiveBuilder::create`], bound to a single test module.

use std::sync::{Arc, LazyLock};

use crate::base::{ModuleInterner, QName};

use super::build::EffectiveBuilder;
use super::declared::DeclaredFactory;
use super::stmt::EffectiveStatement;

pub const NAMESPACE: &str = "urn:yangtree:test";

static FACTORY: LazyLock<DeclaredFactory> =
    LazyLock::new(|| DeclaredFactory::new(Arc::new(ModuleInterner::new()), NAMESPACE, None));

pub fn qname(local: &str) -> QName {
    FACTORY.module().bind(local).unwrap()
}

pub fn node(keyword: &str, argument: Option<&str>, children: Vec<EffectiveStatement>) -> EffectiveStatement {
    let declared = FACTORY.stmt(keyword, argument, vec![]).unwrap();
    EffectiveBuilder::default().create(declared, children).unwrap()
}

pub fn module(name: &str, children: Vec<EffectiveStatement>) -> EffectiveStatement {
    node("module", Some(name), children)
}

pub fn leaf(name: &str) -> EffectiveStatement {
    node("leaf", Some(name), vec![])
}

pub fn container(name: &str, children: Vec<EffectiveStatement>) -> EffectiveStatement {
    node("container", Some(name), children)
}

pub fn list(name: &str, children: Vec<EffectiveStatement>) -> EffectiveStatement {
    node("list", Some(name), children)
}

pub fn choice(name: &str, children: Vec<EffectiveStatement>) -> EffectiveStatement {
    node("choice", Some(name), children)
}

pub fn case(name: &str, children: Vec<EffectiveStatement>) -> EffectiveStatement {
    node("case", Some(name), children)
}

pub fn grouping(name: &str, children: Vec<EffectiveStatement>) -> EffectiveStatement {
    node("grouping", Some(name), children)
}

pub fn typedef(name: &str) -> EffectiveStatement {
    node("typedef", Some(name), vec![node("type", Some("string"), vec![])])
}

pub fn action(name: &str) -> EffectiveStatement {
    node("action", Some(name), vec![])
}

pub fn description(text: &str) -> EffectiveStatement {
    node("description", Some(text), vec![])
}
