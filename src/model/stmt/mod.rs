//! Concrete effective statements and the [`EffectiveStatement`] union.
//!
//! Every concrete type is allocated once behind an `Arc` and is immutable after
//! construction. [`EffectiveStatement`] is a cheap handle: cloning it clones
//! one `Arc`, and equality is identity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::base::{QName, SourceLocation};

use super::argument::Argument;
use super::declared::DeclaredStatement;
use super::flags::Flags;
use super::index::StatementNamespace;
use super::keyword::StatementKind;
use super::mixins::{DataTreeAware, EffectiveState, SchemaTreeAware, TypedefAware, WithFlags};
use super::shape::StatementOrigin;
use super::typedef::TypedefNamespace;

/// Opt a statement type into capabilities whose methods are all defaulted.
macro_rules! capabilities {
    (impl<$param:ident: $bound:ident> $ty:ty => $($cap:ident),+ $(,)?) => {
        $(impl<$param: $bound> $crate::model::mixins::$cap for $ty {})+
    };
    ($ty:ty => $($cap:ident),+ $(,)?) => {
        $(impl $crate::model::mixins::$cap for $ty {})+
    };
}

/// Implement [`WithFlags`] for a statement type with a `flags` field.
macro_rules! with_flags {
    (impl<$param:ident: $bound:ident> $ty:ty) => {
        impl<$param: $bound> $crate::model::mixins::WithFlags for $ty {
            fn flags(&self) -> $crate::model::flags::Flags {
                self.flags
            }
        }
    };
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::model::mixins::WithFlags for $ty {
            fn flags(&self) -> $crate::model::flags::Flags {
                self.flags
            }
        })+
    };
}

mod data;
mod definition;
mod meta;
mod module;
mod operation;

pub use data::{
    CaseStatement, ChoiceStatement, ContainerStatement, DeclaredCase, ImplicitCase,
    LeafListStatement, LeafStatement, ListStatement, OpaqueStatement,
};
pub use definition::{AugmentStatement, GroupingStatement, TypedefStatement, UsesStatement};
pub use meta::{MetaStatement, MustStatement, UnknownStatement};
pub use module::{ImportStatement, ModuleStatement};
pub use operation::{NotificationStatement, OperationContainerStatement, OperationStatement};

/// An effective statement of any kind.
#[derive(Clone)]
pub enum EffectiveStatement {
    Module(Arc<ModuleStatement>),
    Import(Arc<ImportStatement>),
    Container(Arc<ContainerStatement>),
    List(Arc<ListStatement>),
    Leaf(Arc<LeafStatement>),
    LeafList(Arc<LeafListStatement>),
    Choice(Arc<ChoiceStatement>),
    Case(Arc<DeclaredCase>),
    ImplicitCase(Arc<ImplicitCase>),
    /// `anydata` and `anyxml`.
    Opaque(Arc<OpaqueStatement>),
    Grouping(Arc<GroupingStatement>),
    Uses(Arc<UsesStatement>),
    Augment(Arc<AugmentStatement>),
    Typedef(Arc<TypedefStatement>),
    /// `rpc` and `action`.
    Operation(Arc<OperationStatement>),
    /// `input` and `output`.
    OperationContainer(Arc<OperationContainerStatement>),
    Notification(Arc<NotificationStatement>),
    Must(Arc<MustStatement>),
    Unknown(Arc<UnknownStatement>),
    /// Argument-only statements such as `description` or `config`.
    Meta(Arc<MetaStatement>),
    /// Another statement re-annotated with a different source location.
    Forwarding(Arc<ForwardingStatement>),
}

macro_rules! downcast {
    ($($(#[$doc:meta])* $name:ident => $variant:ident: $ty:ty;)+) => {
        $(
            $(#[$doc])*
            pub fn $name(&self) -> Option<&$ty> {
                match self.resolved() {
                    Self::$variant(stmt) => Some(stmt.as_ref()),
                    _ => None,
                }
            }
        )+
    };
}

impl EffectiveStatement {
    /// Wrap `stmt` so that it reports `location` instead of its own.
    pub fn annotated(stmt: EffectiveStatement, location: SourceLocation) -> Self {
        Self::Forwarding(Arc::new(ForwardingStatement {
            delegate: stmt,
            location,
        }))
    }

    /// The statement behind any forwarding layers.
    pub fn resolved(&self) -> &EffectiveStatement {
        let mut current = self;
        while let Self::Forwarding(forwarding) = current {
            current = &forwarding.delegate;
        }
        current
    }

    fn state(&self) -> &dyn EffectiveState {
        match self {
            Self::Module(stmt) => &**stmt,
            Self::Import(stmt) => &**stmt,
            Self::Container(stmt) => &**stmt,
            Self::List(stmt) => &**stmt,
            Self::Leaf(stmt) => &**stmt,
            Self::LeafList(stmt) => &**stmt,
            Self::Choice(stmt) => &**stmt,
            Self::Case(stmt) => &**stmt,
            Self::ImplicitCase(stmt) => &**stmt,
            Self::Opaque(stmt) => &**stmt,
            Self::Grouping(stmt) => &**stmt,
            Self::Uses(stmt) => &**stmt,
            Self::Augment(stmt) => &**stmt,
            Self::Typedef(stmt) => &**stmt,
            Self::Operation(stmt) => &**stmt,
            Self::OperationContainer(stmt) => &**stmt,
            Self::Notification(stmt) => &**stmt,
            Self::Must(stmt) => &**stmt,
            Self::Unknown(stmt) => &**stmt,
            Self::Meta(stmt) => &**stmt,
            Self::Forwarding(stmt) => stmt.delegate.state(),
        }
    }

    fn addr(&self) -> *const () {
        match self {
            Self::Module(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Import(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Container(stmt) => Arc::as_ptr(stmt).cast(),
            Self::List(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Leaf(stmt) => Arc::as_ptr(stmt).cast(),
            Self::LeafList(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Choice(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Case(stmt) => Arc::as_ptr(stmt).cast(),
            Self::ImplicitCase(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Opaque(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Grouping(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Uses(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Augment(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Typedef(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Operation(stmt) => Arc::as_ptr(stmt).cast(),
            Self::OperationContainer(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Notification(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Must(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Unknown(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Meta(stmt) => Arc::as_ptr(stmt).cast(),
            Self::Forwarding(stmt) => Arc::as_ptr(stmt).cast(),
        }
    }

    /// Whether both handles point at the same statement.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    pub fn kind(&self) -> StatementKind {
        self.state().kind()
    }

    pub fn argument(&self) -> &Argument {
        self.state().argument()
    }

    pub fn effective_substatements(&self) -> &[EffectiveStatement] {
        self.state().effective_substatements()
    }

    pub fn declared(&self) -> Option<&Arc<DeclaredStatement>> {
        self.state().declared()
    }

    pub fn origin(&self) -> StatementOrigin {
        self.state().origin()
    }

    /// The source location, preferring the outermost forwarding annotation.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Forwarding(forwarding) => Some(&forwarding.location),
            _ => self.state().location(),
        }
    }

    pub fn find_first_argument(&self, kind: StatementKind) -> Option<&Argument> {
        self.state().find_first_argument(kind)
    }

    /// The key under which this statement appears in its parent's schema tree,
    /// or `None` if it is not a schema tree child.
    pub fn schema_tree_name(&self) -> Option<&QName> {
        if self.kind().is_schema_tree() {
            self.argument().as_qname()
        } else {
            None
        }
    }

    /// The schema tree namespace, if this kind of statement has one.
    pub fn schema_tree(&self) -> Option<&StatementNamespace> {
        match self.resolved() {
            Self::Module(stmt) => Some(stmt.schema_tree()),
            Self::Container(stmt) => Some(stmt.schema_tree()),
            Self::List(stmt) => Some(stmt.schema_tree()),
            Self::Choice(stmt) => Some(stmt.schema_tree()),
            Self::Case(stmt) => Some(stmt.schema_tree()),
            Self::ImplicitCase(stmt) => Some(stmt.schema_tree()),
            Self::Grouping(stmt) => Some(stmt.schema_tree()),
            Self::Augment(stmt) => Some(stmt.schema_tree()),
            Self::Operation(stmt) => Some(stmt.schema_tree()),
            Self::OperationContainer(stmt) => Some(stmt.schema_tree()),
            Self::Notification(stmt) => Some(stmt.schema_tree()),
            _ => None,
        }
    }

    /// The data tree namespace, if this kind of statement has one.
    pub fn data_tree(&self) -> Option<&StatementNamespace> {
        match self.resolved() {
            Self::Module(stmt) => Some(stmt.data_tree()),
            Self::Container(stmt) => Some(stmt.data_tree()),
            Self::List(stmt) => Some(stmt.data_tree()),
            Self::Case(stmt) => Some(stmt.data_tree()),
            Self::ImplicitCase(stmt) => Some(stmt.data_tree()),
            Self::Grouping(stmt) => Some(stmt.data_tree()),
            Self::Augment(stmt) => Some(stmt.data_tree()),
            Self::OperationContainer(stmt) => Some(stmt.data_tree()),
            Self::Notification(stmt) => Some(stmt.data_tree()),
            _ => None,
        }
    }

    /// The typedef namespace, if this kind of statement may define typedefs.
    pub fn typedefs(&self) -> Option<TypedefNamespace<'_>> {
        match self.resolved() {
            Self::Module(stmt) => Some(stmt.typedefs()),
            Self::Container(stmt) => Some(stmt.typedefs()),
            Self::List(stmt) => Some(stmt.typedefs()),
            Self::Grouping(stmt) => Some(stmt.typedefs()),
            Self::Operation(stmt) => Some(stmt.typedefs()),
            Self::OperationContainer(stmt) => Some(stmt.typedefs()),
            Self::Notification(stmt) => Some(stmt.typedefs()),
            _ => None,
        }
    }

    /// The packed flags, if this kind of statement carries them.
    pub fn flags(&self) -> Option<Flags> {
        match self.resolved() {
            Self::Container(stmt) => Some(stmt.flags()),
            Self::List(stmt) => Some(stmt.flags()),
            Self::Leaf(stmt) => Some(stmt.flags()),
            Self::LeafList(stmt) => Some(stmt.flags()),
            Self::Choice(stmt) => Some(stmt.flags()),
            Self::Case(stmt) => Some(stmt.flags()),
            Self::ImplicitCase(stmt) => Some(stmt.flags()),
            Self::Opaque(stmt) => Some(stmt.flags()),
            Self::Grouping(stmt) => Some(stmt.flags()),
            Self::Uses(stmt) => Some(stmt.flags()),
            Self::Augment(stmt) => Some(stmt.flags()),
            Self::Typedef(stmt) => Some(stmt.flags()),
            Self::Operation(stmt) => Some(stmt.flags()),
            Self::OperationContainer(stmt) => Some(stmt.flags()),
            Self::Notification(stmt) => Some(stmt.flags()),
            Self::Unknown(stmt) => Some(stmt.flags()),
            Self::Module(_)
            | Self::Import(_)
            | Self::Must(_)
            | Self::Meta(_)
            | Self::Forwarding(_) => None,
        }
    }

    downcast! {
        as_module => Module: ModuleStatement;
        as_import => Import: ImportStatement;
        as_container => Container: ContainerStatement;
        as_list => List: ListStatement;
        as_leaf => Leaf: LeafStatement;
        as_leaf_list => LeafList: LeafListStatement;
        as_choice => Choice: ChoiceStatement;
        /// A `case` written in source.
        as_case => Case: DeclaredCase;
        /// A `case` synthesized around a shorthand `choice` child.
        as_implicit_case => ImplicitCase: ImplicitCase;
        as_opaque => Opaque: OpaqueStatement;
        as_grouping => Grouping: GroupingStatement;
        as_uses => Uses: UsesStatement;
        as_augment => Augment: AugmentStatement;
        as_typedef => Typedef: TypedefStatement;
        as_operation => Operation: OperationStatement;
        as_operation_container => OperationContainer: OperationContainerStatement;
        as_notification => Notification: NotificationStatement;
        as_must => Must: MustStatement;
        as_unknown => Unknown: UnknownStatement;
        as_meta => Meta: MetaStatement;
    }
}

impl PartialEq for EffectiveStatement {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for EffectiveStatement {}

impl Hash for EffectiveStatement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for EffectiveStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.declared() {
            Some(declared) => declared.keyword(),
            None => self.kind().keyword(),
        };
        let mut tuple = f.debug_tuple(keyword);
        let argument = self.argument();
        if *argument != Argument::Empty {
            tuple.field(&format_args!("{argument}"));
        }
        let substatements = self.effective_substatements();
        if !substatements.is_empty() {
            tuple.field(&substatements);
        }
        tuple.finish()
    }
}

/// A statement relaying every query to its delegate, except for its source
/// location.
#[derive(Debug)]
pub struct ForwardingStatement {
    delegate: EffectiveStatement,
    location: SourceLocation,
}

impl ForwardingStatement {
    pub fn delegate(&self) -> &EffectiveStatement {
        &self.delegate
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}
