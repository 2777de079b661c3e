//! Foundation types for the yangtree model.
//!
//! This module provides fundamental types used throughout the model:
//! - [`QName`], [`QNameModule`], [`Revision`] - Namespaced names
//! - [`ModuleInterner`] - Module identity deduplication
//! - [`LineCol`], [`SourceLocation`] - Statement source positions
//!
//! This module has NO dependencies on other yangtree modules.

mod intern;
mod location;
mod qname;

pub use intern::ModuleInterner;
pub use location::{LineCol, SourceLocation};
pub use qname::{QName, QNameError, QNameModule, Revision, check_identifier};
