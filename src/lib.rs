//! # yangtree-base
//!
//! Effective statement model for YANG schemas: the immutable, indexed tree a
//! schema compiler produces once declared statements have been resolved.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! model   → effective statements, namespaces, capabilities, tree builder
//!   ↓
//! base    → Primitives (QName, module interning, source locations)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use yangtree::base::ModuleInterner;
//! use yangtree::model::mixins::DataTreeAware;
//! use yangtree::model::{DeclaredFactory, EffectiveBuilder};
//!
//! let f = DeclaredFactory::new(Arc::new(ModuleInterner::new()), "urn:example", None);
//! let module = f.stmt("module", Some("example"), vec![
//!     f.stmt("container", Some("system"), vec![
//!         f.stmt("leaf", Some("hostname"), vec![])?,
//!     ])?,
//! ])?;
//!
//! let tree = EffectiveBuilder::default().build(&module)?;
//! let system = tree.as_module().unwrap().data_tree_child(&f.module().bind("system")?);
//! assert!(system.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Foundation types: QName, module interning, source locations
pub mod base;

/// Effective statement model
pub mod model;

pub use base::{QName, QNameModule, SourceLocation};
pub use model::{BuildError, EffectiveBuilder, EffectiveStatement};
