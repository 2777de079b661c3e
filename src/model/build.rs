//! Declared tree → effective tree.
//!
//! Construction is bottom-up: the substatements of a statement are fully built
//! before the statement itself, so every index a statement builds reads only
//! finished children. Siblings are independent and may be built in parallel.

use std::sync::Arc;

use rayon::prelude::*;

use super::argument::{Argument, OrderedBy, Status};
use super::config::BuildConfig;
use super::declared::DeclaredStatement;
use super::error::{BuildError, NamespaceConflict};
use super::flags::{Flags, History};
use super::keyword::{ArgumentKind, StatementKind};
use super::stmt::{
    AugmentStatement, ChoiceStatement, ContainerStatement, DeclaredCase, EffectiveStatement,
    GroupingStatement, ImplicitCase, ImportStatement, LeafListStatement, LeafStatement,
    ListStatement, MetaStatement, ModuleStatement, MustStatement, NotificationStatement,
    OperationContainerStatement, OperationStatement, OpaqueStatement, TypedefStatement,
    UnknownStatement, UsesStatement,
};

/// What a statement inherits from its ancestors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Context {
    /// Effective config of the parent; `None` where config does not apply.
    config: Option<bool>,
    history: History,
}

impl Context {
    /// The context handed to the substatements of a `kind` statement with an
    /// explicit `config` of `explicit`.
    fn enter(self, kind: StatementKind, explicit: Option<bool>) -> Self {
        let config = match kind {
            StatementKind::Grouping
            | StatementKind::Rpc
            | StatementKind::Action
            | StatementKind::Input
            | StatementKind::Output
            | StatementKind::Notification => None,
            _ => self.effective_config(explicit),
        };
        let history = if kind == StatementKind::Augment {
            History::AUGMENTING
        } else {
            self.history
        };
        Self { config, history }
    }

    /// An explicit config wins unless config does not apply here at all.
    fn effective_config(self, explicit: Option<bool>) -> Option<bool> {
        self.config.map(|inherited| explicit.unwrap_or(inherited))
    }
}

/// Builds effective trees from declared trees.
#[derive(Clone, Debug, Default)]
pub struct EffectiveBuilder {
    config: BuildConfig,
}

impl EffectiveBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    fn root_context(&self) -> Context {
        Context {
            config: Some(self.config.top_level_config),
            history: History::default(),
        }
    }

    /// Build the effective tree rooted at `declared`.
    ///
    /// Fails on the first argument mismatch or namespace conflict found; no
    /// partial tree is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(keyword = declared.keyword()))]
    pub fn build(&self, declared: &Arc<DeclaredStatement>) -> Result<EffectiveStatement, BuildError> {
        let root = self.build_in(declared, self.root_context())?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(nodes = count_nodes(&root), "effective tree built");
        }
        Ok(root)
    }

    /// Build several independent trees in parallel, preserving their order.
    #[tracing::instrument(level = "debug", skip_all, fields(roots = roots.len()))]
    pub fn build_all(
        &self,
        roots: &[Arc<DeclaredStatement>],
    ) -> Result<Vec<EffectiveStatement>, BuildError> {
        roots.par_iter().map(|root| self.build(root)).collect()
    }

    /// Construct one top-level statement from substatements that are already
    /// built. The declared substatements of `declared` are not consulted.
    pub fn create(
        &self,
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
    ) -> Result<EffectiveStatement, BuildError> {
        self.construct(declared, substatements, self.root_context())
    }

    fn build_in(
        &self,
        declared: &Arc<DeclaredStatement>,
        context: Context,
    ) -> Result<EffectiveStatement, BuildError> {
        let children = declared.declared_substatements();
        let explicit = children
            .iter()
            .find(|child| child.kind() == StatementKind::Config)
            .and_then(|child| child.argument().as_bool());
        let inner = context.enter(declared.kind(), explicit);

        let substatements = if self.config.builds_in_parallel(children.len()) {
            children
                .par_iter()
                .map(|child| self.build_in(child, inner))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            children
                .iter()
                .map(|child| self.build_in(child, inner))
                .collect::<Result<Vec<_>, _>>()?
        };

        self.construct(Arc::clone(declared), substatements, context)
    }

    fn construct(
        &self,
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        context: Context,
    ) -> Result<EffectiveStatement, BuildError> {
        check_argument(&declared)?;

        let kind = declared.kind();
        let location = declared.location().cloned();
        let explicit =
            first_argument(&substatements, StatementKind::Config).and_then(Argument::as_bool);
        if context.config == Some(false) && explicit == Some(true) {
            return Err(BuildError::ConfigUnderState { kind, location });
        }
        let count = substatements.len();
        let stmt = self
            .assemble(declared, substatements, context)
            .map_err(|conflict| BuildError::Conflict { conflict, location })?;

        tracing::trace!(%kind, substatements = count, "constructed statement");
        Ok(stmt)
    }

    fn assemble(
        &self,
        declared: Arc<DeclaredStatement>,
        substatements: Vec<EffectiveStatement>,
        context: Context,
    ) -> Result<EffectiveStatement, NamespaceConflict> {
        let indexing = self.config.typedef_indexing;
        let flags = flags_of(&substatements, context);

        Ok(match declared.kind() {
            StatementKind::Module => EffectiveStatement::Module(Arc::new(ModuleStatement::new(
                declared,
                substatements,
                indexing,
            )?)),
            StatementKind::Import => EffectiveStatement::Import(Arc::new(ImportStatement::new(
                declared,
                substatements,
            )?)),
            StatementKind::Container => EffectiveStatement::Container(Arc::new(
                ContainerStatement::new(declared, substatements, flags, indexing)?,
            )),
            StatementKind::List => EffectiveStatement::List(Arc::new(ListStatement::new(
                declared,
                substatements,
                flags,
                indexing,
            )?)),
            StatementKind::Leaf => EffectiveStatement::Leaf(Arc::new(LeafStatement::new(
                declared,
                substatements,
                flags,
            )?)),
            StatementKind::LeafList => EffectiveStatement::LeafList(Arc::new(
                LeafListStatement::new(declared, substatements, flags)?,
            )),
            StatementKind::Choice => {
                let case_flags = implicit_case_flags(flags);
                let substatements = substatements
                    .into_iter()
                    .map(|child| wrap_shorthand_case(child, case_flags))
                    .collect::<Result<Vec<_>, _>>()?;
                EffectiveStatement::Choice(Arc::new(ChoiceStatement::new(
                    declared,
                    substatements,
                    flags,
                )?))
            }
            StatementKind::Case => EffectiveStatement::Case(Arc::new(DeclaredCase::from_declared(
                declared,
                substatements,
                flags,
            )?)),
            StatementKind::Anydata | StatementKind::Anyxml => EffectiveStatement::Opaque(
                Arc::new(OpaqueStatement::new(declared, substatements, flags)?),
            ),
            StatementKind::Grouping => EffectiveStatement::Grouping(Arc::new(
                GroupingStatement::new(declared, substatements, flags, indexing)?,
            )),
            StatementKind::Uses => EffectiveStatement::Uses(Arc::new(UsesStatement::new(
                declared,
                substatements,
                flags,
            )?)),
            StatementKind::Augment => EffectiveStatement::Augment(Arc::new(
                AugmentStatement::new(declared, substatements, flags)?,
            )),
            StatementKind::Typedef => EffectiveStatement::Typedef(Arc::new(
                TypedefStatement::new(declared, substatements, flags)?,
            )),
            StatementKind::Rpc | StatementKind::Action => EffectiveStatement::Operation(Arc::new(
                OperationStatement::new(declared, substatements, flags, indexing)?,
            )),
            StatementKind::Input | StatementKind::Output => {
                EffectiveStatement::OperationContainer(Arc::new(OperationContainerStatement::new(
                    declared,
                    substatements,
                    flags,
                    indexing,
                )?))
            }
            StatementKind::Notification => EffectiveStatement::Notification(Arc::new(
                NotificationStatement::new(declared, substatements, flags, indexing)?,
            )),
            StatementKind::Must => {
                EffectiveStatement::Must(Arc::new(MustStatement::new(declared, substatements)?))
            }
            StatementKind::Unknown => EffectiveStatement::Unknown(Arc::new(
                UnknownStatement::new(declared, substatements, flags)?,
            )),
            StatementKind::Base
            | StatementKind::Config
            | StatementKind::Default
            | StatementKind::Description
            | StatementKind::Enum
            | StatementKind::ErrorAppTag
            | StatementKind::ErrorMessage
            | StatementKind::IfFeature
            | StatementKind::Key
            | StatementKind::Length
            | StatementKind::Mandatory
            | StatementKind::MaxElements
            | StatementKind::MinElements
            | StatementKind::Namespace
            | StatementKind::OrderedBy
            | StatementKind::Path
            | StatementKind::Pattern
            | StatementKind::Prefix
            | StatementKind::Presence
            | StatementKind::Range
            | StatementKind::Reference
            | StatementKind::Revision
            | StatementKind::RevisionDate
            | StatementKind::Status
            | StatementKind::Type
            | StatementKind::Units
            | StatementKind::When
            | StatementKind::YangVersion => {
                EffectiveStatement::Meta(Arc::new(MetaStatement::new(declared, substatements)?))
            }
        })
    }
}

/// Reject arguments whose shape does not fit the statement kind.
fn check_argument(declared: &DeclaredStatement) -> Result<(), BuildError> {
    let kind = declared.kind();
    let expected = match kind {
        // extensions take any argument or none
        StatementKind::Unknown => return Ok(()),
        _ if kind.is_schema_tree() => ArgumentKind::Identifier,
        _ => kind.argument_kind(),
    };
    if declared.argument().kind() == expected {
        Ok(())
    } else {
        Err(BuildError::ArgumentMismatch {
            kind,
            expected,
            location: declared.location().cloned(),
        })
    }
}

fn first_argument(substatements: &[EffectiveStatement], kind: StatementKind) -> Option<&Argument> {
    substatements
        .iter()
        .find(|stmt| stmt.kind() == kind)
        .map(EffectiveStatement::argument)
}

fn flags_of(substatements: &[EffectiveStatement], context: Context) -> Flags {
    let status = first_argument(substatements, StatementKind::Status)
        .and_then(Argument::as_status)
        .unwrap_or_default();
    let explicit = first_argument(substatements, StatementKind::Config).and_then(Argument::as_bool);
    let mandatory = first_argument(substatements, StatementKind::Mandatory)
        .and_then(Argument::as_bool)
        .unwrap_or(false);
    let presence = first_argument(substatements, StatementKind::Presence).is_some();
    let user_ordered = first_argument(substatements, StatementKind::OrderedBy)
        .and_then(Argument::as_ordered_by)
        == Some(OrderedBy::User);

    Flags::builder()
        .status(status)
        .config(context.effective_config(explicit))
        .history(context.history)
        .mandatory(mandatory)
        .presence(presence)
        .user_ordered(user_ordered)
        .build()
}

/// An implicit case inherits config and history from its choice.
fn implicit_case_flags(choice: Flags) -> Flags {
    Flags::builder()
        .status(Status::Current)
        .config(choice.config())
        .history(choice.history())
        .build()
}

fn wrap_shorthand_case(
    child: EffectiveStatement,
    flags: Flags,
) -> Result<EffectiveStatement, NamespaceConflict> {
    if !child.kind().is_shorthand_case() {
        return Ok(child);
    }
    let Some(name) = child.schema_tree_name().cloned() else {
        return Ok(child);
    };
    let case = ImplicitCase::wrapping(name, child, flags)?;
    Ok(EffectiveStatement::ImplicitCase(Arc::new(case)))
}

fn count_nodes(stmt: &EffectiveStatement) -> usize {
    1 + stmt
        .effective_substatements()
        .iter()
        .map(count_nodes)
        .sum::<usize>()
}
