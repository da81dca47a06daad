//! Scene Graph - node arena with stable identifiers
//!
//! Nodes are never removed, so a `NodeId` stays valid for the lifetime of
//! the graph. Animation code holds ids, not references.

use std::collections::HashMap;
use std::fmt;

use visage_core::{VisageError, VisageResult};

use crate::{Geometry, Material, Transform, Vec3};

/// Stable scene node identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometry + material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
}

/// One node of the scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    /// Own visibility; effective visibility also requires visible ancestors
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }
}

/// Hierarchy of groups and meshes
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    names: HashMap<String, NodeId>,
}

impl SceneGraph {
    /// Empty scene holding only the root group
    pub fn new() -> Self {
        let root = SceneNode {
            id: NodeId::ROOT,
            name: "root".to_string(),
            kind: NodeKind::Group,
            transform: Transform::IDENTITY,
            visible: true,
            parent: None,
            children: Vec::new(),
        };
        let mut names = HashMap::new();
        names.insert(root.name.clone(), NodeId::ROOT);
        SceneGraph {
            nodes: vec![root],
            names,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn insert(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
        transform: Transform,
    ) -> VisageResult<NodeId> {
        let id = NodeId(self.nodes.len() as u32);
        self.node_mut(parent)?.children.push(id);
        self.nodes.push(SceneNode {
            id,
            name: name.to_string(),
            kind,
            transform,
            visible: true,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Declare a group under `parent`
    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: &str,
        transform: Transform,
    ) -> VisageResult<NodeId> {
        self.insert(parent, name, NodeKind::Group, transform)
    }

    /// Declare a mesh under `parent`
    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: &str,
        geometry: Geometry,
        material: Material,
        transform: Transform,
    ) -> VisageResult<NodeId> {
        self.insert(
            parent,
            name,
            NodeKind::Mesh(Mesh { geometry, material }),
            transform,
        )
    }

    pub fn node(&self, id: NodeId) -> VisageResult<&SceneNode> {
        self.nodes
            .get(id.0 as usize)
            .ok_or(VisageError::NodeNotFound(id.0))
    }

    pub fn node_mut(&mut self, id: NodeId) -> VisageResult<&mut SceneNode> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(VisageError::NodeNotFound(id.0))
    }

    /// Look a node up by its declared name (last declaration wins)
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn transform(&self, id: NodeId) -> VisageResult<&Transform> {
        Ok(&self.node(id)?.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> VisageResult<&mut Transform> {
        Ok(&mut self.node_mut(id)?.transform)
    }

    pub fn material(&self, id: NodeId) -> VisageResult<&Material> {
        match &self.node(id)?.kind {
            NodeKind::Mesh(mesh) => Ok(&mesh.material),
            NodeKind::Group => Err(VisageError::NotAMesh(id.0)),
        }
    }

    pub fn material_mut(&mut self, id: NodeId) -> VisageResult<&mut Material> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Mesh(mesh) => Ok(&mut mesh.material),
            NodeKind::Group => Err(VisageError::NotAMesh(id.0)),
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> VisageResult<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Visible itself and through every ancestor
    pub fn is_visible(&self, id: NodeId) -> VisageResult<bool> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            if !node.visible {
                return Ok(false);
            }
            cursor = node.parent;
        }
        Ok(true)
    }

    /// Map a point in `id`'s local space into world space
    pub fn to_world(&self, id: NodeId, point: Vec3) -> VisageResult<Vec3> {
        let mut p = point;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            p = node.transform.apply(p);
            cursor = node.parent;
        }
        Ok(p)
    }

    /// Depth-first, declaration-order walk with depth
    pub fn walk<F: FnMut(&SceneNode, usize)>(&self, mut visit: F) {
        let mut stack = vec![(NodeId::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0 as usize];
            visit(node, depth);
            for child in node.children.iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
    }

    /// Every mesh node in declaration order
    pub fn meshes(&self) -> impl Iterator<Item = (&SceneNode, &Mesh)> {
        self.nodes
            .iter()
            .filter_map(|node| node.mesh().map(|mesh| (node, mesh)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_core::Color;

    fn disc() -> (Geometry, Material) {
        (Geometry::circle(1.0, 16), Material::basic(Color::white()))
    }

    #[test]
    fn test_declare_and_find() {
        let mut scene = SceneGraph::new();
        let group = scene.add_group(scene.root(), "eye", Transform::at(-0.45, 0.3, 0.1)).unwrap();
        let (g, m) = disc();
        let pupil = scene.add_mesh(group, "pupil", g, m, Transform::IDENTITY).unwrap();

        assert_eq!(scene.find("pupil"), Some(pupil));
        assert_eq!(scene.node(pupil).unwrap().parent(), Some(group));
        assert_eq!(scene.node(group).unwrap().children(), &[pupil]);
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.meshes().count(), 1);
    }

    #[test]
    fn test_unknown_node() {
        let mut scene = SceneGraph::new();
        assert_eq!(
            scene.transform_mut(NodeId(42)).unwrap_err(),
            VisageError::NodeNotFound(42)
        );
        assert_eq!(
            scene.material(scene.root()).unwrap_err(),
            VisageError::NotAMesh(0)
        );
        let (g, m) = disc();
        assert!(scene.add_mesh(NodeId(7), "orphan", g, m, Transform::IDENTITY).is_err());
    }

    #[test]
    fn test_world_transform_chains_parents() {
        let mut scene = SceneGraph::new();
        let group = scene.add_group(scene.root(), "mouth", Transform::at(0.0, -0.4, 0.1)).unwrap();
        let (g, m) = disc();
        let mesh = scene.add_mesh(group, "lips", g, m, Transform::at(0.0, 0.0, 0.01)).unwrap();

        let world = scene.to_world(mesh, Vec3::new(0.1, 0.0, 0.0)).unwrap();
        assert!((world.x - 0.1).abs() < 1e-6);
        assert!((world.y + 0.4).abs() < 1e-6);
        assert!((world.z - 0.11).abs() < 1e-6);
    }

    #[test]
    fn test_visibility_is_inherited() {
        let mut scene = SceneGraph::new();
        let group = scene.add_group(scene.root(), "g", Transform::IDENTITY).unwrap();
        let (g, m) = disc();
        let mesh = scene.add_mesh(group, "m", g, m, Transform::IDENTITY).unwrap();

        assert!(scene.is_visible(mesh).unwrap());
        scene.set_visible(group, false).unwrap();
        assert!(!scene.is_visible(mesh).unwrap());
    }

    #[test]
    fn test_walk_order() {
        let mut scene = SceneGraph::new();
        let a = scene.add_group(scene.root(), "a", Transform::IDENTITY).unwrap();
        scene.add_group(a, "a1", Transform::IDENTITY).unwrap();
        scene.add_group(scene.root(), "b", Transform::IDENTITY).unwrap();

        let mut seen = Vec::new();
        scene.walk(|node, depth| seen.push((node.name.clone(), depth)));
        assert_eq!(
            seen,
            vec![
                ("root".to_string(), 0),
                ("a".to_string(), 1),
                ("a1".to_string(), 2),
                ("b".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_material_mutation() {
        let mut scene = SceneGraph::new();
        let (g, m) = disc();
        let mesh = scene.add_mesh(scene.root(), "dot", g, m.translucent(0.3), Transform::IDENTITY).unwrap();

        scene.material_mut(mesh).unwrap().opacity = 0.9;
        assert_eq!(scene.material(mesh).unwrap().opacity, 0.9);
    }
}
