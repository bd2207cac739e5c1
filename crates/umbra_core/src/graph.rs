//! Hierarchical scene description and its flattening into a [`Scene`].
//!
//! A [`Model`] is a tree of group, leaf and light nodes joined by transformed
//! edges. [`flatten`] walks it once, accumulating transforms, and returns the
//! object and light lists the tracer consumes. The walk builds its lists from
//! its return values, so nothing is shared or mutated across recursion frames.

use std::sync::Arc;

use umbra_math::Mat4;

use crate::{Light, Material, Primitive, Scene, SceneObject, Texture};

/// A renderable leaf.
#[derive(Clone, Debug)]
pub struct LeafNode {
    pub name: String,
    pub primitive: Primitive,
    pub material: Material,
    pub texture: Option<Arc<Texture>>,
}

impl LeafNode {
    pub fn new(name: impl Into<String>, primitive: Primitive, material: Material) -> Self {
        Self {
            name: name.into(),
            primitive,
            material,
            texture: None,
        }
    }

    /// Attach a decoded texture; textured leaves blend it into their shading.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }
}

/// A node of the scene graph.
#[derive(Clone, Debug)]
pub enum SceneNode {
    Group { name: String, children: Vec<Edge> },
    Leaf(LeafNode),
    Light { name: String, light: Light },
}

impl SceneNode {
    /// An empty group.
    pub fn group(name: impl Into<String>) -> Self {
        SceneNode::Group {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Add a child under `transform`. Non-group nodes are returned unchanged.
    pub fn with_child(mut self, transform: Mat4, node: SceneNode) -> Self {
        if let SceneNode::Group { children, .. } = &mut self {
            children.push(Edge { transform, node });
        }
        self
    }
}

/// Parent-to-child connection carrying the child's transform.
#[derive(Clone, Debug)]
pub struct Edge {
    pub transform: Mat4,
    pub node: SceneNode,
}

/// A complete scene description.
#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub root: SceneNode,
    /// Lights already expressed in view space; they bypass the graph transforms.
    pub view_space_lights: Vec<Light>,
}

impl Model {
    pub fn new(name: impl Into<String>, root: SceneNode) -> Self {
        Self {
            name: name.into(),
            root,
            view_space_lights: Vec::new(),
        }
    }

    pub fn with_view_space_light(mut self, light: Light) -> Self {
        self.view_space_lights.push(light);
        self
    }
}

/// Flatten `model` into view space.
///
/// `view` is the camera matrix; it is the starting transform of the walk, so
/// the resulting objects and lights share a frame with the camera at the origin
/// looking down -z. View-space lights come first in the light list.
pub fn flatten(model: &Model, view: Mat4) -> Scene {
    let (objects, graph_lights) = collect(&model.root, view);

    let mut lights = model.view_space_lights.clone();
    lights.extend(graph_lights);

    log::debug!(
        "Flattened model '{}': {} objects, {} lights",
        model.name,
        objects.len(),
        lights.len()
    );

    Scene::new(objects, lights)
}

fn collect(node: &SceneNode, transform: Mat4) -> (Vec<SceneObject>, Vec<Light>) {
    match node {
        SceneNode::Group { children, .. } => {
            let mut objects = Vec::new();
            let mut lights = Vec::new();
            for edge in children {
                let (child_objects, child_lights) = collect(&edge.node, transform * edge.transform);
                objects.extend(child_objects);
                lights.extend(child_lights);
            }
            (objects, lights)
        }
        SceneNode::Leaf(leaf) => {
            let mut object = SceneObject::new(&leaf.name, leaf.primitive, transform, leaf.material.clone());
            if let Some(texture) = &leaf.texture {
                object = object.with_texture(texture.clone());
            }
            (vec![object], Vec::new())
        }
        SceneNode::Light { light, .. } => (Vec::new(), vec![light.transformed(&transform)]),
    }
}
