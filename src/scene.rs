//! Host-side scene container.
//!
//! The sphere does not own its place in the world; the host hands it a
//! scene and the sphere inserts its mesh exactly once. Storage is a flat
//! list with monotonically assigned ids, which is all the membership
//! queries in this crate need.

/// Identity of one inserted mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(u32);

/// A renderable entry as the scene sees it.
#[derive(Debug)]
pub struct SceneMesh {
    id: MeshId,
    label: String,
}

impl SceneMesh {
    /// The mesh's scene identity.
    #[must_use]
    pub fn id(&self) -> MeshId {
        self.id
    }

    /// Human-readable label, for logs.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The externally-owned scene container. Insertion only; removal is not
/// part of the sphere's lifecycle (it lives as long as the scene).
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<SceneMesh>,
    next_id: u32,
}

impl Scene {
    /// An empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a renderable and return its assigned id.
    pub fn add(&mut self, label: &str) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.meshes.push(SceneMesh {
            id,
            label: label.to_owned(),
        });
        log::debug!("scene: added mesh {label:?} as {id:?}");
        id
    }

    /// Number of meshes currently in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the scene holds no meshes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Whether `id` is present.
    #[must_use]
    pub fn contains(&self, id: MeshId) -> bool {
        self.meshes.iter().any(|m| m.id == id)
    }

    /// Iterate over the inserted meshes.
    pub fn iter(&self) -> impl Iterator<Item = &SceneMesh> {
        self.meshes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_membership_holds() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        let a = scene.add("sphere");
        let b = scene.add("other");
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert!(scene.contains(a));
        assert!(scene.contains(b));
    }
}
