//! Scene graph and hierarchical scene organization.
//!
//! A [`SceneGraph`] owns every node that is visible in one viewer session: the
//! two persistent lights followed by the room shell, fixtures, furniture groups
//! and, once loaded, an external asset. Nodes are trait objects so that groups,
//! meshes and lights compose freely into furniture hierarchies.

use std::sync::Arc;

use log::warn;

use crate::data_structures::{
    instance::Instance,
    model::{Material, MeshData},
};

/// Light sources supported by the shader.
#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    Ambient { color: [f32; 3], intensity: f32 },
    Directional { color: [f32; 3], intensity: f32 },
}

/// What a node contributes to a frame besides its children.
pub enum NodeKind<'a> {
    Group,
    Mesh {
        mesh: &'a Arc<MeshData>,
        material: &'a Arc<Material>,
    },
    Light(&'a Light),
}

pub trait SceneNode: Send {
    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind<'_>;

    fn get_local_transform(&self) -> &Instance;

    fn set_local_transform(&mut self, instance: Instance);

    fn get_world_transform(&self) -> &Instance;

    /**
     * Recomputes the world transform of `self` from the parent's world transform and
     * passes the result down to all children.
     */
    fn update_world_transforms(&mut self, parents_world_transform: &Instance);

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    fn add_child(&mut self, child: Box<dyn SceneNode>);

    /// Deep copy of the subtree, sharing geometry and materials.
    fn boxed_clone(&self) -> Box<dyn SceneNode>;
}

/// Local and world transform pair shared by all node types.
#[derive(Clone, Debug, Default)]
struct Transforms {
    local: Instance,
    world: Instance,
}

impl Transforms {
    fn at(local: Instance) -> Self {
        Self {
            world: local.clone(),
            local,
        }
    }

    fn update(&mut self, parent: &Instance) -> &Instance {
        self.world = parent * &self.local;
        &self.world
    }
}

/// A named group without geometry of its own, e.g. a furniture assembly.
pub struct ContainerNode {
    name: String,
    transforms: Transforms,
    pub children: Vec<Box<dyn SceneNode>>,
}

impl ContainerNode {
    pub fn new(name: &str, local: Instance) -> Self {
        Self {
            name: name.to_string(),
            transforms: Transforms::at(local),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Box<dyn SceneNode>>) -> Self {
        self.children = children;
        self
    }
}

impl SceneNode for ContainerNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind<'_> {
        NodeKind::Group
    }

    fn get_local_transform(&self) -> &Instance {
        &self.transforms.local
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.transforms.local = instance;
    }

    fn get_world_transform(&self) -> &Instance {
        &self.transforms.world
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        let world = self.transforms.update(parents_world_transform).clone();
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn boxed_clone(&self) -> Box<dyn SceneNode> {
        Box::new(Self {
            name: self.name.clone(),
            transforms: self.transforms.clone(),
            children: self.children.iter().map(|c| c.boxed_clone()).collect(),
        })
    }
}

/// A single primitive or loaded mesh with its material.
pub struct MeshNode {
    name: String,
    transforms: Transforms,
    mesh: Arc<MeshData>,
    material: Arc<Material>,
    children: Vec<Box<dyn SceneNode>>,
}

impl MeshNode {
    pub fn new(name: &str, mesh: Arc<MeshData>, material: Arc<Material>, local: Instance) -> Self {
        Self {
            name: name.to_string(),
            transforms: Transforms::at(local),
            mesh,
            material,
            children: Vec::new(),
        }
    }

    pub fn mesh(&self) -> &Arc<MeshData> {
        &self.mesh
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl SceneNode for MeshNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind<'_> {
        NodeKind::Mesh {
            mesh: &self.mesh,
            material: &self.material,
        }
    }

    fn get_local_transform(&self) -> &Instance {
        &self.transforms.local
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.transforms.local = instance;
    }

    fn get_world_transform(&self) -> &Instance {
        &self.transforms.world
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        let world = self.transforms.update(parents_world_transform).clone();
        for child in self.children.iter_mut() {
            child.update_world_transforms(&world);
        }
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn boxed_clone(&self) -> Box<dyn SceneNode> {
        Box::new(Self {
            name: self.name.clone(),
            transforms: self.transforms.clone(),
            mesh: self.mesh.clone(),
            material: self.material.clone(),
            children: self.children.iter().map(|c| c.boxed_clone()).collect(),
        })
    }
}

/// A light source. Directional lights shine from their world position towards
/// the origin.
pub struct LightNode {
    name: String,
    transforms: Transforms,
    light: Light,
    children: Vec<Box<dyn SceneNode>>,
}

impl LightNode {
    pub fn new(name: &str, light: Light, local: Instance) -> Self {
        Self {
            name: name.to_string(),
            transforms: Transforms::at(local),
            light,
            children: Vec::new(),
        }
    }
}

impl SceneNode for LightNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind<'_> {
        NodeKind::Light(&self.light)
    }

    fn get_local_transform(&self) -> &Instance {
        &self.transforms.local
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.transforms.local = instance;
    }

    fn get_world_transform(&self) -> &Instance {
        &self.transforms.world
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        self.transforms.update(parents_world_transform);
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, _: Box<dyn SceneNode>) {
        warn!("Lights cannot have children, ignoring child of {}", self.name);
    }

    fn boxed_clone(&self) -> Box<dyn SceneNode> {
        Box::new(Self {
            name: self.name.clone(),
            transforms: self.transforms.clone(),
            light: self.light.clone(),
            children: Vec::new(),
        })
    }
}

/// Number of light nodes at the front of every graph.
pub const LIGHT_COUNT: usize = 2;

/// The node tree of one viewer session.
pub struct SceneGraph {
    root: ContainerNode,
    revision: u64,
}

impl SceneGraph {
    /// Creates a graph that only holds the ambient and the directional light.
    pub fn new(ambient: Light, directional: Light, sun_position: [f32; 3]) -> Self {
        let mut root = ContainerNode::new("scene", Instance::new());
        root.add_child(Box::new(LightNode::new(
            "ambient-light",
            ambient,
            Instance::new(),
        )));
        root.add_child(Box::new(LightNode::new(
            "directional-light",
            directional,
            Instance::at(sun_position[0], sun_position[1], sun_position[2]),
        )));
        Self { root, revision: 0 }
    }

    pub fn root(&self) -> &ContainerNode {
        &self.root
    }

    /// Bumped on every mutation. Renderers compare it to decide when to re-upload.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Appends a top level node and refreshes its world transforms.
    pub fn add(&mut self, mut node: Box<dyn SceneNode>) {
        node.update_world_transforms(self.root.get_world_transform());
        self.root.add_child(node);
        self.revision += 1;
    }

    /// Top level nodes that belong to the room, i.e. everything except the lights.
    pub fn room_nodes(&self) -> &[Box<dyn SceneNode>] {
        &self.root.get_children()[LIGHT_COUNT.min(self.root.children.len())..]
    }

    pub fn lights(&self) -> impl Iterator<Item = (&Light, &Instance)> {
        self.root
            .get_children()
            .iter()
            .filter_map(|node| match node.kind() {
                NodeKind::Light(light) => Some((light, node.get_world_transform())),
                _ => None,
            })
    }

    /// Visits every node depth first, including the root.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a dyn SceneNode)) {
        walk_node(&self.root, visit);
    }

    /// Total number of nodes below the root.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count - 1
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if let NodeKind::Mesh { .. } = node.kind() {
                count += 1;
            }
        });
        count
    }

    pub fn find(&self, name: &str) -> Option<&dyn SceneNode> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && node.name() == name {
                found = Some(node);
            }
        });
        found
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

fn walk_node<'a>(node: &'a dyn SceneNode, visit: &mut dyn FnMut(&'a dyn SceneNode)) {
    visit(node);
    for child in node.get_children() {
        walk_node(child.as_ref(), visit);
    }
}

/// Axis aligned world bounds of all meshes in a subtree.
pub fn world_bounds(node: &dyn SceneNode) -> Option<([f32; 3], [f32; 3])> {
    let mut bounds: Option<([f32; 3], [f32; 3])> = None;
    collect_bounds(node, &mut bounds);
    bounds
}

fn collect_bounds(node: &dyn SceneNode, bounds: &mut Option<([f32; 3], [f32; 3])>) {
    if let NodeKind::Mesh { mesh, .. } = node.kind() {
        if let Some((min, max)) = mesh.bounds() {
            let world = node.get_world_transform();
            for corner in 0..8 {
                let local = cgmath::Vector3::new(
                    if corner & 1 == 0 { min[0] } else { max[0] },
                    if corner & 2 == 0 { min[1] } else { max[1] },
                    if corner & 4 == 0 { min[2] } else { max[2] },
                );
                let p: [f32; 3] = world.transform_point(local).into();
                let (lo, hi) = bounds.get_or_insert((p, p));
                for axis in 0..3 {
                    lo[axis] = lo[axis].min(p[axis]);
                    hi[axis] = hi[axis].max(p[axis]);
                }
            }
        }
    }
    for child in node.get_children() {
        collect_bounds(child.as_ref(), bounds);
    }
}
