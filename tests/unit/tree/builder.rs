use super::*;
use crate::tree::model::{ContainerKind, Len, SizeMode};

#[test]
fn ids_follow_insertion_order() {
    let mut b = TreeBuilder::new();
    let a = b.leaf(Size::new(1.0, 2.0));
    let c = b.leaf(Size::new(3.0, 4.0));
    let root = b.container(ContainerKind::OVERLAY, vec![a, c]);
    assert_eq!((a, c, root), (NodeId(0), NodeId(1), NodeId(2)));

    let tree = b.build(root).unwrap();
    assert_eq!(tree.root(), root);
    assert_eq!(tree.len(), 3);
    assert_eq!(
        tree.node(a).unwrap().kind,
        NodeKind::Leaf {
            content: Size::new(1.0, 2.0)
        }
    );
}

#[test]
fn push_child_appends_and_rejects_leaves() {
    let mut b = TreeBuilder::new();
    let a = b.leaf(Size::new(1.0, 1.0));
    let c = b.leaf(Size::new(1.0, 1.0));
    let root = b.vstack(vec![a]);
    b.push_child(root, c).unwrap();
    assert!(matches!(
        b.push_child(a, c),
        Err(LayoutError::MalformedTree(_))
    ));
    b.name(root, "root").unwrap();

    let tree = b.build(root).unwrap();
    assert_eq!(tree.node(root).unwrap().children(), &[a, c]);
    assert_eq!(tree.find("root"), Some(root));
}

#[test]
fn build_rejects_missing_root() {
    let b = TreeBuilder::new();
    assert!(matches!(
        b.build(NodeId(0)),
        Err(LayoutError::MalformedTree(_))
    ));
}

#[test]
fn styled_container_keeps_style() {
    let mut b = TreeBuilder::new();
    let style = ContainerStyle {
        gap: 4.0,
        ..ContainerStyle::default()
    };
    let root = b.styled_container(ContainerKind::HSTACK, style, vec![]);
    let tree = b.build(root).unwrap();
    let NodeKind::Container { style: got, .. } = &tree.node(root).unwrap().kind else {
        panic!("expected container");
    };
    assert_eq!(got.gap, 4.0);
}

#[test]
fn sizing_defaults_to_fit_and_can_be_set() {
    let mut b = TreeBuilder::new();
    let a = b.leaf(Size::new(1.0, 1.0));
    let root = b.vstack(vec![a]);
    b.sizing(root, Sizing::fixed(Size::new(50.0, 60.0))).unwrap();
    assert!(b.sizing(NodeId(7), Sizing::default()).is_err());

    let tree = b.build(root).unwrap();
    assert_eq!(tree.node(a).unwrap().sizing, Sizing::default());
    assert_eq!(
        tree.node(root).unwrap().sizing.height,
        SizeMode::Fixed(Len::Px(60.0))
    );
}
