//! Build configuration.

use super::keyword::StatementKind;

/// How statements store their typedef namespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TypedefIndexing {
    /// Index `module` and `grouping` typedefs, scan everywhere else.
    #[default]
    Auto,
    /// Index typedefs everywhere.
    Packed,
    /// Never index; scan substatements on lookup.
    Linear,
}

impl TypedefIndexing {
    /// Whether statements of `kind` get a typedef index.
    pub fn packs(self, kind: StatementKind) -> bool {
        match self {
            Self::Auto => matches!(kind, StatementKind::Module | StatementKind::Grouping),
            Self::Packed => true,
            Self::Linear => false,
        }
    }
}

/// Options for [`EffectiveBuilder`](super::EffectiveBuilder).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    pub typedef_indexing: TypedefIndexing,
    /// Effective config of top-level data nodes without a `config` statement.
    pub top_level_config: bool,
    /// Build the children of a statement in parallel once it has at least this
    /// many substatements. `None` builds sequentially.
    pub parallel_threshold: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            typedef_indexing: TypedefIndexing::Auto,
            top_level_config: true,
            parallel_threshold: None,
        }
    }
}

impl BuildConfig {
    #[must_use]
    pub fn with_typedef_indexing(mut self, indexing: TypedefIndexing) -> Self {
        self.typedef_indexing = indexing;
        self
    }

    #[must_use]
    pub fn with_top_level_config(mut self, config: bool) -> Self {
        self.top_level_config = config;
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: Option<usize>) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub(crate) fn builds_in_parallel(&self, children: usize) -> bool {
        self.parallel_threshold
            .is_some_and(|threshold| children >= threshold.max(2))
    }
}
