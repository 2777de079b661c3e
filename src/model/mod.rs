//! The effective statement model.
//!
//! ```text
//! build       → declared tree to effective tree, flags, implicit cases
//!   ↓
//! stmt        → concrete statements, EffectiveStatement union
//!   ↓
//! mixins      → accessor and capability traits
//! shape       → statement base: link axis × tree axis
//!   ↓
//! index       → schema tree / data tree namespaces
//! typedef     → typedef namespace (packed or linear)
//!   ↓
//! namespace   → compact QName-keyed map
//! substatements, flags → compact storage primitives
//! ```

pub mod argument;
pub mod build;
pub mod config;
pub mod declared;
pub mod error;
pub mod flags;
pub mod index;
pub mod keyword;
pub mod mixins;
pub mod namespace;
pub mod shape;
pub mod stmt;
pub mod substatements;
pub mod typedef;

#[cfg(test)]
pub(crate) mod testing;

pub use argument::{Argument, ArgumentParser, OrderedBy, Status};
pub use build::EffectiveBuilder;
pub use config::{BuildConfig, TypedefIndexing};
pub use declared::{DeclaredFactory, DeclaredStatement};
pub use error::{
    ArgumentBindingError, ArgumentError, ArgumentSyntaxError, BuildError, NamespaceConflict,
    NamespaceKind,
};
pub use flags::{Flags, History};
pub use index::{StatementNamespace, TreeNamespaces};
pub use keyword::{ArgumentKind, StatementKind};
pub use namespace::Namespace;
pub use shape::StatementOrigin;
pub use stmt::EffectiveStatement;
pub use substatements::CompactList;
pub use typedef::TypedefNamespace;
