use crate::foundation::core::{Point, Size};
use crate::tree::model::NodeId;

/// Dense per-node value table keyed by [`NodeId`].
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMap<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

/// Resolved sizes produced by the size pass.
pub type SizeMap = NodeMap<Size>;

/// Absolute positions produced by the position pass.
pub type PositionMap = NodeMap<Point>;

impl<T> Default for NodeMap<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }
}

impl<T: Copy> NodeMap<T> {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty map with room for ids below `n`.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            slots: vec![None; n],
            len: 0,
        }
    }

    /// Value for `id`, if any.
    pub fn get(&self, id: NodeId) -> Option<T> {
        self.slots.get(id.index()).copied().flatten()
    }

    /// `true` when `id` has a value.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Set the value for `id`, returning the previous one.
    pub fn insert(&mut self, id: NodeId, value: T) -> Option<T> {
        let idx = id.index();
        if idx >= self.slots.len() {
            self.slots.resize(idx + 1, None);
        }
        let prev = self.slots[idx].replace(value);
        if prev.is_none() {
            self.len += 1;
        }
        prev
    }

    /// Number of ids with a value.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no id has a value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(id, value)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (NodeId(i as u32), v)))
    }
}

impl<T: Copy> FromIterator<(NodeId, T)> for NodeMap<T> {
    fn from_iter<I: IntoIterator<Item = (NodeId, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, v) in iter {
            map.insert(id, v);
        }
        map
    }
}
