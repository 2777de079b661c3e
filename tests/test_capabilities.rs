//! Capability accessors on built trees.

mod common;

use common::*;
use rstest::rstest;
use yangtree::model::mixins::*;
use yangtree::model::{
    BuildConfig, BuildError, OrderedBy, StatementKind, StatementOrigin, Status, TypedefIndexing,
};

// ============================================================================
// DOCUMENTATION AND STATUS
// ============================================================================

#[test]
fn test_description_and_reference() {
    let built = build(&stmt(
        "container",
        "system",
        vec![
            stmt("description", "System parameters.", vec![]),
            stmt("reference", "RFC 7317", vec![]),
        ],
    ))
    .unwrap();
    let system = built.as_container().unwrap();

    assert_eq!(system.description(), Some("System parameters."));
    assert_eq!(system.reference(), Some("RFC 7317"));
    assert_eq!(system.qname(), &name("system"));
}

#[rstest]
#[case(None, Status::Current)]
#[case(Some("current"), Status::Current)]
#[case(Some("deprecated"), Status::Deprecated)]
#[case(Some("obsolete"), Status::Obsolete)]
fn test_status(#[case] written: Option<&str>, #[case] expected: Status) {
    let children = written
        .map(|status| vec![stmt("status", status, vec![])])
        .unwrap_or_default();
    let built = build(&stmt("leaf", "l", children)).unwrap();
    assert_eq!(built.as_leaf().unwrap().status(), expected);
}

#[test]
fn test_extension_statement_parameter() {
    let built = build(&stmt(
        "leaf",
        "l",
        vec![stmt("ext:note", "internal use", vec![])],
    ))
    .unwrap();
    let leaf = built.as_leaf().unwrap();

    let notes: Vec<_> = leaf.unknown_schema_nodes().collect();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].node_parameter(), "internal use");
    assert_eq!(notes[0].extension_keyword(), "ext:note");
    assert_eq!(notes[0].status(), Status::Current);
}

// ============================================================================
// CONFIG AND CONSTRAINTS
// ============================================================================

#[rstest]
#[case(None, None, Some(true))]
#[case(Some("false"), None, Some(false))]
#[case(Some("true"), Some("false"), Some(false))]
#[case(None, Some("false"), Some(false))]
fn test_effective_config_inheritance(
    #[case] parent: Option<&str>,
    #[case] child: Option<&str>,
    #[case] expected: Option<bool>,
) {
    let leaf_children = child
        .map(|config| vec![stmt("config", config, vec![])])
        .unwrap_or_default();
    let mut container_children = vec![stmt("leaf", "l", leaf_children)];
    if let Some(config) = parent {
        container_children.push(stmt("config", config, vec![]));
    }

    let built = build(&stmt("container", "c", container_children)).unwrap();
    let container = built.as_container().unwrap();
    let leaf = container.data_tree_child(&name("l")).unwrap().as_leaf().unwrap();
    assert_eq!(leaf.effective_config(), expected);
}

#[test]
fn test_config_true_under_state_data_is_rejected() {
    let declared = stmt(
        "container",
        "counters",
        vec![
            stmt("config", "false", vec![]),
            stmt("leaf", "reset", vec![stmt("config", "true", vec![])]),
        ],
    );
    let err = build(&declared).unwrap_err();
    assert!(matches!(
        err,
        BuildError::ConfigUnderState {
            kind: StatementKind::Leaf,
            ..
        }
    ));
    assert_eq!(err.code(), "E0105");
}

#[rstest]
#[case("list", None, None, 0, None)]
#[case("list", Some("1"), Some("16"), 1, Some(16))]
#[case("list", Some("2"), Some("unbounded"), 2, None)]
#[case("leaf-list", None, Some("4"), 0, Some(4))]
fn test_element_counts(
    #[case] keyword: &str,
    #[case] min: Option<&str>,
    #[case] max: Option<&str>,
    #[case] expected_min: u32,
    #[case] expected_max: Option<u32>,
) {
    let mut children = Vec::new();
    if let Some(min) = min {
        children.push(stmt("min-elements", min, vec![]));
    }
    if let Some(max) = max {
        children.push(stmt("max-elements", max, vec![]));
    }
    let built = build(&stmt(keyword, "entries", children)).unwrap();
    let (min_elements, max_elements) = match built.as_list() {
        Some(list) => (list.min_elements(), list.max_elements()),
        None => {
            let leaf_list = built.as_leaf_list().unwrap();
            (leaf_list.min_elements(), leaf_list.max_elements())
        }
    };
    assert_eq!(min_elements, expected_min);
    assert_eq!(max_elements, expected_max);
}

#[rstest]
#[case("leaf")]
#[case("choice")]
#[case("anyxml")]
fn test_mandatory(#[case] keyword: &str) {
    let built = build(&stmt(keyword, "m", vec![stmt("mandatory", "true", vec![])])).unwrap();
    let mandatory = match keyword {
        "leaf" => built.as_leaf().unwrap().is_mandatory(),
        "choice" => built.as_choice().unwrap().is_mandatory(),
        _ => built.as_opaque().unwrap().is_mandatory(),
    };
    assert!(mandatory);
}

#[test]
fn test_presence_container() {
    let built = build(&stmt(
        "container",
        "tls",
        vec![stmt("presence", "enables TLS", vec![])],
    ))
    .unwrap();
    let tls = built.as_container().unwrap();

    assert!(tls.is_presence_container());
    assert_eq!(tls.presence(), Some("enables TLS"));

    let plain = build(&stmt("container", "plain", vec![])).unwrap();
    assert!(!plain.as_container().unwrap().is_presence_container());
}

#[rstest]
#[case(None, OrderedBy::System)]
#[case(Some("system"), OrderedBy::System)]
#[case(Some("user"), OrderedBy::User)]
fn test_ordered_by(#[case] written: Option<&str>, #[case] expected: OrderedBy) {
    let mut children = vec![stmt("key", "name", vec![]), stmt("leaf", "name", vec![])];
    if let Some(order) = written {
        children.push(stmt("ordered-by", order, vec![]));
    }
    let built = build(&stmt("list", "servers", children)).unwrap();
    let list = built.as_list().unwrap();

    assert_eq!(list.ordered_by(), expected);
    assert_eq!(list.is_user_ordered(), expected == OrderedBy::User);
}

#[test]
fn test_list_keys() {
    let built = build(&stmt(
        "list",
        "route",
        vec![
            stmt("key", "prefix next-hop", vec![]),
            stmt("leaf", "prefix", vec![]),
            stmt("leaf", "next-hop", vec![]),
        ],
    ))
    .unwrap();
    let keys: Vec<_> = built.as_list().unwrap().keys().collect();
    assert_eq!(keys, vec!["prefix", "next-hop"]);
}

#[test]
fn test_must_constraints_and_error_message() {
    let built = build(&stmt(
        "leaf",
        "mtu",
        vec![
            stmt(
                "must",
                ". >= 68",
                vec![
                    stmt("error-message", "MTU too small", vec![]),
                    stmt("error-app-tag", "mtu-range", vec![]),
                ],
            ),
            stmt("must", ". <= 9000", vec![]),
        ],
    ))
    .unwrap();
    let musts: Vec<_> = built.as_leaf().unwrap().must_constraints().collect();

    assert_eq!(musts.len(), 2);
    assert_eq!(musts[0].xpath(), ". >= 68");
    assert_eq!(musts[0].error_message(), Some("MTU too small"));
    assert_eq!(musts[0].error_app_tag(), Some("mtu-range"));
    assert_eq!(musts[1].error_message(), None);
}

#[test]
fn test_when_condition() {
    let built = build(&stmt(
        "container",
        "ipv6",
        vec![stmt("when", "../enabled = 'true'", vec![])],
    ))
    .unwrap();
    assert_eq!(
        built.as_container().unwrap().when_condition(),
        Some("../enabled = 'true'")
    );
}

#[test]
fn test_leaf_type_units_default() {
    let built = build(&stmt(
        "leaf",
        "timeout",
        vec![
            stmt("type", "uint32", vec![]),
            stmt("units", "seconds", vec![]),
            stmt("default", "30", vec![]),
        ],
    ))
    .unwrap();
    let leaf = built.as_leaf().unwrap();

    assert_eq!(leaf.type_name(), Some(&name("uint32")));
    assert_eq!(leaf.units(), Some("seconds"));
    assert_eq!(leaf.default_value(), Some("30"));
}

// ============================================================================
// MODULE HEADER
// ============================================================================

#[test]
fn test_module_header() {
    let built = build(&stmt(
        "module",
        "acme-system",
        vec![
            stmt("yang-version", "1.1", vec![]),
            stmt("namespace", NAMESPACE, vec![]),
            stmt("prefix", "acme", vec![]),
            stmt(
                "import",
                "ietf-inet-types",
                vec![
                    stmt("prefix", "inet", vec![]),
                    stmt("revision-date", "2013-07-15", vec![]),
                ],
            ),
            stmt("import", "ietf-yang-types", vec![stmt("prefix", "yang", vec![])]),
            stmt("revision", "2023-11-02", vec![stmt("description", "Initial.", vec![])]),
            stmt("revision", "2024-06-30", vec![]),
        ],
    ))
    .unwrap();
    let module = built.as_module().unwrap();

    assert_eq!(module.prefix(), Some("acme"));
    assert_eq!(module.yang_version(), "1.1");
    assert_eq!(module.revision().map(|rev| rev.as_str()), Some("2024-06-30"));

    let imports: Vec<_> = module.imports().collect();
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].module_name(), "ietf-inet-types");
    assert_eq!(imports[0].prefix(), Some("inet"));
    assert_eq!(imports[0].revision_date().map(|rev| rev.as_str()), Some("2013-07-15"));
    assert_eq!(imports[1].prefix(), Some("yang"));
    assert_eq!(imports[1].revision_date(), None);
}

#[test]
fn test_module_header_defaults() {
    let built = build(&stmt("module", "bare", vec![])).unwrap();
    let module = built.as_module().unwrap();

    assert_eq!(module.prefix(), None);
    assert_eq!(module.yang_version(), "1");
    assert_eq!(module.revision(), None);
    assert_eq!(module.imports().count(), 0);
}

#[test]
fn test_type_restrictions_are_kept() {
    let built = build(&stmt(
        "container",
        "server",
        vec![
            stmt("if-feature", "tls", vec![]),
            stmt(
                "leaf",
                "port",
                vec![stmt("type", "uint16", vec![stmt("range", "1..65535", vec![])])],
            ),
            stmt(
                "leaf",
                "host",
                vec![stmt(
                    "type",
                    "string",
                    vec![
                        stmt("length", "1..253", vec![]),
                        stmt("pattern", "[a-z0-9.-]+", vec![]),
                    ],
                )],
            ),
            stmt(
                "leaf",
                "mode",
                vec![stmt(
                    "type",
                    "enumeration",
                    vec![stmt("enum", "active", vec![]), stmt("enum", "standby", vec![])],
                )],
            ),
            stmt(
                "leaf",
                "cipher",
                vec![stmt("type", "identityref", vec![stmt("base", "cipher-suite", vec![])])],
            ),
            stmt(
                "leaf",
                "peer",
                vec![stmt("type", "leafref", vec![stmt("path", "../host", vec![])])],
            ),
        ],
    ))
    .unwrap();
    let server = built.as_container().unwrap();

    let kinds = |leaf: &str| -> Vec<StatementKind> {
        let leaf = server.data_tree_child(&name(leaf)).unwrap();
        leaf.effective_substatements()[0]
            .effective_substatements()
            .iter()
            .map(|sub| sub.kind())
            .collect()
    };
    assert_eq!(kinds("port"), vec![StatementKind::Range]);
    assert_eq!(kinds("host"), vec![StatementKind::Length, StatementKind::Pattern]);
    assert_eq!(kinds("mode"), vec![StatementKind::Enum, StatementKind::Enum]);
    assert_eq!(kinds("cipher"), vec![StatementKind::Base]);
    assert_eq!(kinds("peer"), vec![StatementKind::Path]);
    assert_eq!(
        server.effective_substatements()[0].kind(),
        StatementKind::IfFeature
    );
}

// ============================================================================
// CONTAINERS OF DEFINITIONS
// ============================================================================

#[test]
fn test_augmentations_and_uses() {
    let module = stmt(
        "module",
        "m",
        vec![
            stmt("grouping", "endpoint", vec![stmt("leaf", "address", vec![])]),
            stmt(
                "container",
                "server",
                vec![stmt(
                    "uses",
                    "endpoint",
                    vec![stmt("augment", "address", vec![stmt("leaf", "extra", vec![])])],
                )],
            ),
            stmt("augment", "/server", vec![stmt("leaf", "port", vec![])]),
        ],
    );
    let built = build(&module).unwrap();
    let module = built.as_module().unwrap();

    let groupings: Vec<_> = module.groupings().map(|g| g.qname().clone()).collect();
    assert_eq!(groupings, vec![name("endpoint")]);

    let augments: Vec<_> = module.augmentations().collect();
    assert_eq!(augments.len(), 1);
    assert_eq!(augments[0].target_path(), Some("/server"));
    let port = augments[0].data_tree_child(&name("port")).unwrap();
    assert!(port.as_leaf().unwrap().is_augmenting());

    let server = module.data_child_by_name(&name("server")).unwrap();
    let uses: Vec<_> = server.as_container().unwrap().uses().collect();
    assert_eq!(uses.len(), 1);
    assert_eq!(uses[0].source_grouping(), Some(&name("endpoint")));
    assert_eq!(uses[0].augmentations().count(), 1);
}

#[test]
fn test_actions_and_notifications() {
    let built = build(&stmt(
        "container",
        "interface",
        vec![
            stmt("action", "reset", vec![]),
            stmt("notification", "link-down", vec![]),
            stmt("leaf", "name", vec![]),
        ],
    ))
    .unwrap();
    let interface = built.as_container().unwrap();

    let actions: Vec<_> = interface.actions().collect();
    assert_eq!(actions.len(), 1);
    assert!(actions[0].is_action());
    assert!(interface.find_action(&name("reset")).is_some());
    assert!(interface.find_action(&name("name")).is_none());

    assert_eq!(interface.notifications().count(), 1);
    assert!(interface.find_notification(&name("link-down")).is_some());

    let children: Vec<_> = interface.child_nodes().map(|c| c.kind()).collect();
    assert_eq!(children, vec![StatementKind::Leaf]);
}

#[test]
fn test_operation_input_output() {
    let built = build(&stmt(
        "module",
        "m",
        vec![stmt(
            "rpc",
            "restart",
            vec![
                bare("input", vec![stmt("leaf", "delay", vec![])]),
                bare("output", vec![stmt("leaf", "status", vec![])]),
            ],
        )],
    ))
    .unwrap();
    let module = built.as_module().unwrap();
    let rpc = module.find_rpc(&name("restart")).unwrap();
    assert!(!rpc.is_action());

    let input = rpc.input().unwrap();
    let output = rpc.output().unwrap();
    assert!(input.is_input());
    assert!(!output.is_input());
    assert_eq!(input.effective_config(), None);
    assert!(input.data_tree_child(&name("delay")).is_some());
    assert!(output.data_tree_child(&name("status")).is_some());

    let delay = input.data_tree_child(&name("delay")).unwrap();
    assert_eq!(delay.as_leaf().unwrap().effective_config(), None);
}

#[rstest]
#[case(TypedefIndexing::Auto)]
#[case(TypedefIndexing::Packed)]
#[case(TypedefIndexing::Linear)]
fn test_typedef_lookup(#[case] indexing: TypedefIndexing) {
    let declared = stmt(
        "module",
        "m",
        vec![
            stmt("typedef", "port-number", vec![stmt("type", "uint16", vec![])]),
            stmt(
                "container",
                "c",
                vec![stmt(
                    "typedef",
                    "percent",
                    vec![stmt("type", "uint8", vec![]), stmt("units", "%", vec![])],
                )],
            ),
        ],
    );
    let config = BuildConfig::default().with_typedef_indexing(indexing);
    let built = build_with(config, &declared).unwrap();
    let module = built.as_module().unwrap();

    let port = module.typedef(&name("port-number")).unwrap();
    assert_eq!(port.type_name(), Some(&name("uint16")));
    assert!(module.typedef(&name("percent")).is_none());

    let container = module.data_child_by_name(&name("c")).unwrap().as_container().unwrap();
    let percent = container.typedef(&name("percent")).unwrap();
    assert_eq!(percent.units(), Some("%"));
    assert_eq!(container.type_definitions().count(), 1);
}

// ============================================================================
// CHOICE AND CASE
// ============================================================================

#[test]
fn test_implicit_case_has_no_declaration() {
    let built = build(&stmt(
        "choice",
        "transport",
        vec![
            stmt("leaf", "udp", vec![]),
            stmt("case", "tcp", vec![stmt("leaf", "port", vec![])]),
        ],
    ))
    .unwrap();
    let choice = built.as_choice().unwrap();

    let udp = choice.find_case(&name("udp")).unwrap();
    assert!(udp.declared().is_none());
    assert_eq!(udp.origin(), StatementOrigin::Context);
    let implicit = udp.as_implicit_case().unwrap();
    assert_eq!(implicit.qname(), &name("udp"));
    assert!(implicit.data_tree_child(&name("udp")).is_some());

    let tcp = choice.find_case(&name("tcp")).unwrap();
    assert!(tcp.declared().is_some());
    assert_eq!(tcp.origin(), StatementOrigin::Declaration);
    assert!(tcp.as_case().is_some());

    assert_eq!(choice.cases().count(), 2);
}

#[rstest]
#[case(Some("tcp"), Some("tcp"))]
#[case(Some("udp"), Some("udp"))]
#[case(None, None)]
fn test_default_case(#[case] default: Option<&str>, #[case] expected: Option<&str>) {
    let mut children = vec![
        stmt("leaf", "udp", vec![]),
        stmt("case", "tcp", vec![stmt("leaf", "port", vec![])]),
    ];
    if let Some(default) = default {
        children.push(stmt("default", default, vec![]));
    }
    let built = build(&stmt("choice", "transport", children)).unwrap();

    let found = built
        .as_choice()
        .unwrap()
        .default_case()
        .and_then(|case| case.argument().as_qname())
        .map(|name| name.local_name().to_owned());
    assert_eq!(found.as_deref(), expected);
}
