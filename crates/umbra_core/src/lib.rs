//! Umbra Core - Scene data for the Umbra ray tracer.
//!
//! This crate provides:
//!
//! - **Render inputs**: `SceneObject`, `Light`, `Material`, `Texture`, and the
//!   flattened `Scene` snapshot the tracer consumes
//! - **Scene graph**: hierarchical `Model`s and the `flatten` pass that turns
//!   them into a `Scene`
//!
//! # Example
//!
//! ```ignore
//! use umbra_core::graph::{flatten, Model};
//!
//! let scene = flatten(&model, view_matrix);
//! println!("{} objects, {} lights", scene.objects.len(), scene.lights.len());
//! ```

pub mod graph;
pub mod light;
pub mod material;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use graph::{flatten, Edge, LeafNode, Model, SceneNode};
pub use light::Light;
pub use material::{Color, Material};
pub use scene::{Primitive, Scene, SceneObject};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
