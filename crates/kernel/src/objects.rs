use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use skyline_common::{ObjectKind, SceneObject};

/// Named scene objects, stored in a BTreeMap for deterministic iteration.
///
/// Objects are inserted once at scene construction; nothing here removes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneObjects {
    objects: BTreeMap<String, SceneObject>,
}

impl SceneObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object under `name`.
    pub fn insert(&mut self, name: impl Into<String>, object: SceneObject) {
        self.objects.insert(name.into(), object);
    }

    pub fn get(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SceneObject)> {
        self.objects.iter().map(|(name, obj)| (name.as_str(), obj))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Per-frame update order: every vehicle first, then the rest by name.
    ///
    /// Obstacles test against the vehicle box cached during the same frame,
    /// so vehicles must be visited before any obstacle.
    pub fn update_order(&self) -> Vec<String> {
        let (mut order, rest): (Vec<_>, Vec<_>) = self
            .objects
            .iter()
            .partition(|(_, obj)| obj.kind() == ObjectKind::Vehicle);
        order.extend(rest);
        order.into_iter().map(|(name, _)| name.clone()).collect()
    }

    /// Count of objects carrying `kind`.
    pub fn count_kind(&self, kind: ObjectKind) -> usize {
        self.objects.values().filter(|o| o.kind() == kind).count()
    }
}
