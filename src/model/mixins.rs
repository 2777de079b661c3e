//! Statement accessors and capabilities.
//!
//! Concrete statements implement the accessors first. [`EffectiveState`] and
//! the tree accessors come for free through [`Shaped`]. [`WithFlags`] and
//! [`TypedefAware`] are one-line impls. Statements then opt into capabilities
//! with empty impls, since every capability method has a default body written
//! against the accessors only.

use std::sync::Arc;

use crate::base::{QName, SourceLocation};

use super::argument::{Argument, OrderedBy, Status};
use super::declared::DeclaredStatement;
use super::flags::Flags;
use super::index::StatementNamespace;
use super::keyword::StatementKind;
use super::shape::{HasDataTree, HasSchemaTree, LinkShape, Shaped, StatementOrigin};
use super::stmt::{
    AugmentStatement, EffectiveStatement, GroupingStatement, MustStatement,
    NotificationStatement, OperationContainerStatement, OperationStatement, TypedefStatement,
    UnknownStatement, UsesStatement,
};
use super::typedef::TypedefNamespace;

// ============================================================================
// ACCESSORS
// ============================================================================

/// The state every effective statement exposes.
pub trait EffectiveState {
    fn kind(&self) -> StatementKind;

    fn argument(&self) -> &Argument;

    /// Substatements in declaration order.
    fn effective_substatements(&self) -> &[EffectiveStatement];

    /// The declared statement, or `None` if this statement was synthesized.
    fn declared(&self) -> Option<&Arc<DeclaredStatement>>;

    fn origin(&self) -> StatementOrigin;

    fn location(&self) -> Option<&SourceLocation> {
        self.declared().and_then(|declared| declared.location())
    }

    /// The argument of the first substatement of `kind`.
    fn find_first_argument(&self, kind: StatementKind) -> Option<&Argument> {
        self.effective_substatements()
            .iter()
            .find(|stmt| stmt.kind() == kind)
            .map(EffectiveStatement::argument)
    }
}

impl<S: Shaped> EffectiveState for S {
    fn kind(&self) -> StatementKind {
        self.base().link().kind()
    }

    fn argument(&self) -> &Argument {
        self.base().link().argument()
    }

    fn effective_substatements(&self) -> &[EffectiveStatement] {
        self.base().substatements()
    }

    fn declared(&self) -> Option<&Arc<DeclaredStatement>> {
        self.base().link().declared()
    }

    fn origin(&self) -> StatementOrigin {
        self.base().link().origin()
    }
}

/// Statements with a schema tree namespace.
pub trait SchemaTreeAware: EffectiveState {
    fn schema_tree(&self) -> &StatementNamespace;

    fn schema_tree_child(&self, name: &QName) -> Option<&EffectiveStatement> {
        self.schema_tree().get(name)
    }
}

impl<S> SchemaTreeAware for S
where
    S: Shaped,
    S::Tree: HasSchemaTree,
{
    fn schema_tree(&self) -> &StatementNamespace {
        self.base().tree().schema_tree()
    }
}

/// Statements with a data tree namespace.
pub trait DataTreeAware: SchemaTreeAware {
    fn data_tree(&self) -> &StatementNamespace;

    fn data_tree_child(&self, name: &QName) -> Option<&EffectiveStatement> {
        self.data_tree().get(name)
    }
}

impl<S> DataTreeAware for S
where
    S: Shaped,
    S::Tree: HasDataTree,
{
    fn data_tree(&self) -> &StatementNamespace {
        self.base().tree().data_tree()
    }
}

/// Statements carrying a packed [`Flags`] word.
pub trait WithFlags {
    fn flags(&self) -> Flags;
}

/// Statements that may define typedefs.
pub trait TypedefAware: EffectiveState {
    fn typedefs(&self) -> TypedefNamespace<'_>;

    fn typedef(&self, name: &QName) -> Option<&TypedefStatement> {
        self.typedefs().get(name)
    }
}

// ============================================================================
// CAPABILITIES
// ============================================================================

fn string_argument<S: EffectiveState + ?Sized>(stmt: &S, kind: StatementKind) -> Option<&str> {
    stmt.find_first_argument(kind).and_then(Argument::as_str)
}

fn substatements_as<'a, S, T>(
    stmt: &'a S,
    cast: fn(&'a EffectiveStatement) -> Option<&'a T>,
) -> impl Iterator<Item = &'a T> + 'a
where
    S: EffectiveState + ?Sized,
    T: 'a,
{
    stmt.effective_substatements().iter().filter_map(cast)
}

/// `description`, `reference` and extension statements.
pub trait DocumentedNode: EffectiveState {
    fn description(&self) -> Option<&str> {
        string_argument(self, StatementKind::Description)
    }

    fn reference(&self) -> Option<&str> {
        string_argument(self, StatementKind::Reference)
    }

    /// Extension statements attached to this node.
    fn unknown_schema_nodes(&self) -> impl Iterator<Item = &UnknownStatement> {
        substatements_as(self, EffectiveStatement::as_unknown)
    }
}

pub trait WithStatus: DocumentedNode + WithFlags {
    fn status(&self) -> Status {
        self.flags().status()
    }
}

/// Nodes named by a [`QName`] argument.
pub trait SchemaNode: WithStatus {
    /// # Panics
    /// Panics if the argument is not a qualified name, which the builder
    /// never produces for a schema node.
    fn qname(&self) -> &QName {
        match self.argument() {
            Argument::QName(name) => name,
            other => panic!("{} has a non-QName argument '{other}'", self.kind()),
        }
    }
}

pub trait CopyableNode: WithFlags {
    /// Whether this node was introduced by an `augment`.
    fn is_augmenting(&self) -> bool {
        self.flags().is_augmenting()
    }

    #[deprecated(note = "added-by-uses tracking is kept for layout compatibility only")]
    #[allow(deprecated)]
    fn is_added_by_uses(&self) -> bool {
        self.flags().is_added_by_uses()
    }
}

pub trait WhenConditionAware: EffectiveState {
    fn when_condition(&self) -> Option<&str> {
        string_argument(self, StatementKind::When)
    }
}

pub trait MustConstraintAware: EffectiveState {
    fn must_constraints(&self) -> impl Iterator<Item = &MustStatement> {
        substatements_as(self, EffectiveStatement::as_must)
    }
}

pub trait DataSchemaNode: SchemaNode + CopyableNode + WhenConditionAware {
    /// `Some(true)` for configuration, `Some(false)` for state data, `None`
    /// where config does not apply.
    fn effective_config(&self) -> Option<bool> {
        self.flags().config()
    }
}

pub trait MandatoryAware: WithFlags {
    fn is_mandatory(&self) -> bool {
        self.flags().is_mandatory()
    }
}

pub trait PresenceAware: WithFlags {
    fn is_presence_container(&self) -> bool {
        self.flags().has_presence()
    }
}

pub trait UserOrderedAware: WithFlags {
    fn is_user_ordered(&self) -> bool {
        self.flags().is_user_ordered()
    }

    fn ordered_by(&self) -> OrderedBy {
        if self.is_user_ordered() {
            OrderedBy::User
        } else {
            OrderedBy::System
        }
    }
}

/// `min-elements` and `max-elements` of a list or leaf-list.
pub trait ElementCountAware: EffectiveState {
    /// Defaults to 0.
    fn min_elements(&self) -> u32 {
        self.find_first_argument(StatementKind::MinElements)
            .and_then(Argument::as_unsigned)
            .unwrap_or(0)
    }

    /// `None` when unbounded.
    fn max_elements(&self) -> Option<u32> {
        self.find_first_argument(StatementKind::MaxElements)
            .and_then(Argument::as_upper_bound)
            .flatten()
    }
}

pub trait AugmentationTarget: EffectiveState {
    /// `augment` statements placed directly on this node.
    fn available_augmentations(&self) -> impl Iterator<Item = &AugmentStatement> {
        substatements_as(self, EffectiveStatement::as_augment)
    }
}

pub trait ActionNodeContainer: SchemaTreeAware {
    fn actions(&self) -> impl Iterator<Item = &OperationStatement> {
        self.effective_substatements()
            .iter()
            .filter(|stmt| stmt.kind() == StatementKind::Action)
            .filter_map(EffectiveStatement::as_operation)
    }

    fn find_action(&self, name: &QName) -> Option<&OperationStatement> {
        self.schema_tree_child(name)
            .filter(|stmt| stmt.kind() == StatementKind::Action)
            .and_then(EffectiveStatement::as_operation)
    }
}

pub trait NotificationNodeContainer: SchemaTreeAware {
    fn notifications(&self) -> impl Iterator<Item = &NotificationStatement> {
        substatements_as(self, EffectiveStatement::as_notification)
    }

    fn find_notification(&self, name: &QName) -> Option<&NotificationStatement> {
        self.schema_tree_child(name)
            .and_then(EffectiveStatement::as_notification)
    }
}

/// Nodes holding data definitions, groupings and typedefs.
pub trait DataNodeContainer: DataTreeAware {
    /// Data definition children (`choice` included), in declaration order.
    fn child_nodes(&self) -> impl Iterator<Item = &EffectiveStatement> {
        self.effective_substatements()
            .iter()
            .filter(|stmt| is_data_schema_node(stmt.kind()))
    }

    fn groupings(&self) -> impl Iterator<Item = &GroupingStatement> {
        substatements_as(self, EffectiveStatement::as_grouping)
    }

    fn uses(&self) -> impl Iterator<Item = &UsesStatement> {
        substatements_as(self, EffectiveStatement::as_uses)
    }

    fn type_definitions(&self) -> impl Iterator<Item = &TypedefStatement> {
        substatements_as(self, EffectiveStatement::as_typedef)
    }

    /// A direct data definition child by name; `choice` and `case` are not
    /// looked through.
    fn data_child_by_name(&self, name: &QName) -> Option<&EffectiveStatement> {
        self.schema_tree_child(name)
            .filter(|stmt| is_data_schema_node(stmt.kind()))
    }
}

fn is_data_schema_node(kind: StatementKind) -> bool {
    kind.is_data_tree() || kind == StatementKind::Choice
}

/// `error-message` and `error-app-tag` of a constraint.
pub trait ConstraintMetaDefinition: DocumentedNode {
    fn error_message(&self) -> Option<&str> {
        string_argument(self, StatementKind::ErrorMessage)
    }

    fn error_app_tag(&self) -> Option<&str> {
        string_argument(self, StatementKind::ErrorAppTag)
    }
}

/// `rpc` and `action`.
pub trait OperationDefinition: SchemaNode + SchemaTreeAware {
    fn input(&self) -> Option<&OperationContainerStatement> {
        self.effective_substatements()
            .iter()
            .filter(|stmt| stmt.kind() == StatementKind::Input)
            .find_map(EffectiveStatement::as_operation_container)
    }

    fn output(&self) -> Option<&OperationContainerStatement> {
        self.effective_substatements()
            .iter()
            .filter(|stmt| stmt.kind() == StatementKind::Output)
            .find_map(EffectiveStatement::as_operation_container)
    }

    fn groupings(&self) -> impl Iterator<Item = &GroupingStatement> {
        substatements_as(self, EffectiveStatement::as_grouping)
    }
}

/// Extension statements.
pub trait UnknownSchemaNode: DocumentedNode {
    /// The argument as written, or the empty string.
    fn node_parameter(&self) -> &str {
        self.declared()
            .and_then(|declared| declared.raw_argument())
            .unwrap_or_default()
    }

    /// The `prefix:name` keyword.
    fn extension_keyword(&self) -> &str {
        self.declared()
            .map_or(StatementKind::Unknown.keyword(), |declared| declared.keyword())
    }
}
