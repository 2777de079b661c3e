//! Namespace construction through the effective tree builder.

mod common;

use common::*;
use yangtree::base::{LineCol, SourceLocation};
use yangtree::model::mixins::{DataTreeAware, SchemaTreeAware, TypedefAware};
use yangtree::model::{
    BuildConfig, BuildError, EffectiveStatement, Namespace, NamespaceKind, StatementKind,
    TypedefIndexing,
};

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_duplicate_leaf_is_schema_tree_conflict() {
    let container = stmt(
        "container",
        "c",
        vec![stmt("leaf", "a", vec![]), stmt("leaf", "a", vec![])],
    );

    let err = build(&container).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("schema tree"), "{message}");
    assert!(message.contains('a'), "{message}");
    match err {
        BuildError::Conflict { conflict, .. } => {
            assert_eq!(conflict.kind, NamespaceKind::SchemaTree);
            assert_eq!(conflict.name, name("a"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_choice_is_flattened_into_data_tree() {
    let container = stmt(
        "container",
        "c",
        vec![stmt(
            "choice",
            "ch",
            vec![
                stmt("case", "one", vec![stmt("leaf", "x", vec![])]),
                stmt("case", "two", vec![stmt("leaf", "y", vec![])]),
            ],
        )],
    );

    let built = build(&container).unwrap();
    let container = built.as_container().unwrap();

    let schema = container.schema_tree();
    assert_eq!(schema.len(), 1);
    assert_eq!(schema.keys().next(), Some(&name("ch")));

    let data = container.data_tree();
    assert_eq!(data.len(), 2);
    assert!(data.contains_key(&name("x")));
    assert!(data.contains_key(&name("y")));
    assert_ne!(schema, data);
    assert!(!std::ptr::eq(schema, data));
}

#[test]
fn test_single_plain_leaf_shares_namespace() {
    let built = build(&stmt("container", "c", vec![stmt("leaf", "only", vec![])])).unwrap();
    let container = built.as_container().unwrap();

    assert!(std::ptr::eq(container.schema_tree(), container.data_tree()));
    assert!(matches!(container.schema_tree(), Namespace::Single(..)));
    let only = container.data_tree_child(&name("only"));
    assert_eq!(only.map(EffectiveStatement::kind), Some(StatementKind::Leaf));
}

// ============================================================================
// UNIQUENESS
// ============================================================================

#[test]
fn test_duplicate_across_cases_is_data_tree_conflict() {
    let choice = stmt(
        "choice",
        "ch",
        vec![
            stmt("case", "one", vec![stmt("leaf", "x", vec![])]),
            stmt("case", "two", vec![stmt("leaf", "x", vec![])]),
        ],
    );
    let err = build(&stmt("container", "c", vec![choice])).unwrap_err();
    assert!(err.to_string().contains("data tree"), "{err}");
}

#[test]
fn test_choice_child_clashing_with_sibling() {
    let container = stmt(
        "container",
        "c",
        vec![
            stmt("leaf", "x", vec![]),
            stmt("choice", "ch", vec![stmt("leaf", "x", vec![])]),
        ],
    );
    let err = build(&container).unwrap_err();
    match err {
        BuildError::Conflict { conflict, .. } => {
            assert_eq!(conflict.kind, NamespaceKind::DataTree);
            assert_eq!(conflict.name, name("x"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_duplicate_typedef_conflicts_in_every_strategy() {
    for indexing in [TypedefIndexing::Auto, TypedefIndexing::Packed, TypedefIndexing::Linear] {
        for parent in ["module", "container", "grouping"] {
            let declared = stmt(
                parent,
                "p",
                vec![
                    stmt("typedef", "t", vec![stmt("type", "string", vec![])]),
                    stmt("typedef", "t", vec![stmt("type", "int8", vec![])]),
                ],
            );
            let err = build_with(BuildConfig::default().with_typedef_indexing(indexing), &declared)
                .unwrap_err();
            assert!(err.to_string().contains("typedef"), "{parent} {indexing:?}: {err}");
        }
    }
}

#[test]
fn test_conflict_aborts_whole_build() {
    let module = stmt(
        "module",
        "m",
        vec![
            stmt("leaf", "fine", vec![]),
            stmt(
                "container",
                "broken",
                vec![stmt("leaf", "a", vec![]), stmt("leaf", "a", vec![])],
            ),
        ],
    );
    assert!(build(&module).is_err());
}

// ============================================================================
// TYPEDEF NAMESPACE
// ============================================================================

#[test]
fn test_typedef_strategy_is_not_observable() {
    let declared = stmt(
        "container",
        "c",
        vec![
            stmt("typedef", "percent", vec![stmt("type", "uint8", vec![])]),
            stmt("leaf", "load", vec![stmt("type", "percent", vec![])]),
            stmt("typedef", "name", vec![stmt("type", "string", vec![])]),
        ],
    );

    let packed =
        build_with(BuildConfig::default().with_typedef_indexing(TypedefIndexing::Packed), &declared)
            .unwrap();
    let linear =
        build_with(BuildConfig::default().with_typedef_indexing(TypedefIndexing::Linear), &declared)
            .unwrap();

    let packed = packed.as_container().unwrap();
    let linear = linear.as_container().unwrap();
    for container in [packed, linear] {
        let typedefs = container.typedefs();
        assert_eq!(typedefs.len(), 2);
        let percent = container.typedef(&name("percent")).unwrap();
        assert_eq!(percent.type_name(), Some(&name("uint8")));
        assert!(container.typedef(&name("load")).is_none());
        let names: Vec<_> = typedefs.iter().map(|t| t.name().local_name()).collect();
        assert_eq!(names, vec!["percent", "name"]);
    }
}

// ============================================================================
// SHARING AND ANNOTATION
// ============================================================================

#[test]
fn test_empty_container_shares_empty_namespace() {
    let built = build(&stmt("container", "c", vec![])).unwrap();
    let container = built.as_container().unwrap();
    assert!(matches!(container.schema_tree(), Namespace::Empty));
    assert!(std::ptr::eq(container.schema_tree(), container.data_tree()));
}

#[test]
fn test_rpc_children_do_not_enter_data_tree() {
    let module = stmt(
        "module",
        "m",
        vec![
            stmt("leaf", "l", vec![]),
            stmt("rpc", "reboot", vec![bare("input", vec![stmt("leaf", "delay", vec![])])]),
            stmt("notification", "alarm", vec![]),
        ],
    );
    let built = build(&module).unwrap();
    let module = built.as_module().unwrap();

    assert_eq!(module.schema_tree().len(), 3);
    assert_eq!(module.data_tree().len(), 1);

    let rpc = module.find_rpc(&name("reboot")).unwrap();
    let input = rpc.schema_tree_child(&name("input")).unwrap();
    assert!(input.data_tree().unwrap().contains_key(&name("delay")));
}

#[test]
fn test_annotated_statement_keeps_indices() {
    let built = build(&stmt("container", "c", vec![stmt("leaf", "x", vec![])])).unwrap();
    let location = SourceLocation::new("augmented.yang", LineCol::new(9, 0));
    let annotated = EffectiveStatement::annotated(built.clone(), location.clone());

    assert_eq!(annotated.location(), Some(&location));
    assert!(std::ptr::eq(
        annotated.schema_tree().unwrap(),
        built.schema_tree().unwrap()
    ));
    assert_eq!(annotated.resolved(), &built);
}
