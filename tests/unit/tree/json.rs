use super::*;
use crate::tree::model::{Len, NodeKind, SizeMode};

#[test]
fn parses_nested_containers_and_leaves() {
    let tree = LayoutTree::from_json_str(
        r#"{
            "name": "root",
            "kind": "hstack",
            "gap": 2,
            "padding": 1,
            "align": "center",
            "children": [
                { "name": "col", "kind": "vstack", "children": [
                    { "name": "a", "content": { "width": 10, "height": 5 } }
                ]},
                { "name": "b", "content": { "width": 4, "height": 4 } }
            ]
        }"#,
    )
    .unwrap();

    tree.validate().unwrap();
    let root = tree.find("root").unwrap();
    assert_eq!(tree.root(), root);
    let NodeKind::Container {
        kind,
        style,
        children,
    } = &tree.node(root).unwrap().kind
    else {
        panic!("root must be a container");
    };
    assert_eq!(kind, &ContainerKind::HSTACK);
    assert_eq!(style.gap, 2.0);
    assert_eq!(style.padding, Edges::all(1.0));
    assert_eq!(style.align, Align::Center);
    assert_eq!(children, &vec![tree.find("col").unwrap(), tree.find("b").unwrap()]);
    assert!(tree.node(tree.find("a").unwrap()).unwrap().is_leaf());
}

#[test]
fn container_without_children_is_empty() {
    let tree = LayoutTree::from_json_str(r#"{ "kind": "vstack", "padding": { "top": 3 } }"#)
        .unwrap();
    let node = tree.node(tree.root()).unwrap();
    assert!(node.children().is_empty());
    let NodeKind::Container { style, .. } = &node.kind else {
        panic!("expected container");
    };
    assert_eq!(style.padding.top, 3.0);
    assert_eq!(style.padding.left, 0.0);
}

#[test]
fn rejects_leaf_container_ambiguity() {
    let both = LayoutTree::from_json_str(
        r#"{ "kind": "vstack", "content": { "width": 1, "height": 1 }, "children": [] }"#,
    );
    assert!(matches!(both, Err(LayoutError::MalformedTree(_))));

    let neither = LayoutTree::from_json_str(r#"{ "name": "ghost" }"#);
    assert!(matches!(neither, Err(LayoutError::MalformedTree(m)) if m.contains("ghost")));

    let kindless = LayoutTree::from_json_str(r#"{ "children": [] }"#);
    assert!(matches!(kindless, Err(LayoutError::MalformedTree(_))));

    let styled_leaf =
        LayoutTree::from_json_str(r#"{ "content": { "width": 1, "height": 1 }, "gap": 3 }"#);
    assert!(matches!(styled_leaf, Err(LayoutError::MalformedTree(_))));
}

#[test]
fn syntax_errors_are_serde_errors() {
    assert!(matches!(
        LayoutTree::from_json_str("{ not json"),
        Err(LayoutError::Serde(_))
    ));
    assert!(matches!(
        LayoutTree::from_json_str(r#"{ "kind": "vstack", "colour": "red" }"#),
        Err(LayoutError::Serde(_))
    ));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = LayoutTree::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, LayoutError::Other(_)));
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn rejects_negative_or_non_finite_style() {
    let negative_gap = LayoutTree::from_json_str(
        r#"{ "name": "col", "kind": "vstack", "gap": -100, "children": [] }"#,
    );
    assert!(matches!(
        negative_gap,
        Err(LayoutError::MalformedTree(m)) if m.contains("col") && m.contains("gap")
    ));

    let negative_padding = LayoutTree::from_json_str(
        r#"{ "kind": "hstack", "children": [
            { "kind": "vstack", "padding": { "left": -2 } }
        ] }"#,
    );
    assert!(matches!(
        negative_padding,
        Err(LayoutError::MalformedTree(m)) if m.contains("left padding")
    ));

    let negative_length = LayoutTree::from_json_str(
        r#"{ "content": { "width": 1, "height": 1 }, "height": { "fixed": { "px": -5 } } }"#,
    );
    assert!(matches!(
        negative_length,
        Err(LayoutError::MalformedTree(m)) if m.contains("height length")
    ));
}

#[test]
fn parses_size_modes_and_arrangement() {
    let tree = LayoutTree::from_json_str(
        r#"{
            "name": "bar",
            "kind": "hstack",
            "arrange": "end",
            "width": "fill",
            "height": { "fixed": { "px": 32 } },
            "children": [
                { "name": "icon", "content": { "width": 16, "height": 16 },
                  "width": { "fit_at_least": { "frac": 0.25 } } }
            ]
        }"#,
    )
    .unwrap();

    let bar = tree.node(tree.find("bar").unwrap()).unwrap();
    assert_eq!(bar.sizing.width, SizeMode::Fill);
    assert_eq!(bar.sizing.height, SizeMode::Fixed(Len::Px(32.0)));
    let NodeKind::Container { style, .. } = &bar.kind else {
        panic!("expected container");
    };
    assert_eq!(style.arrange, Align::End);
    assert_eq!(style.align, Align::Start);

    let icon = tree.node(tree.find("icon").unwrap()).unwrap();
    assert_eq!(icon.sizing.width, SizeMode::FitAtLeast(Len::Frac(0.25)));
    assert_eq!(icon.sizing.height, SizeMode::Fit);
}
