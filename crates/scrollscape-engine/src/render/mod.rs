//! GPU rendering subsystem.
//!
//! The scene renderer owns every GPU resource (pipelines, buffers, bind groups)
//! and builds them lazily on first use, rebuilding when the surface format changes.
//!
//! Convention:
//! - meshes are in object space, placed by a per-object model matrix
//! - group 0 carries the camera, group 1 the per-object uniforms
//! - every shader stage is compiled with the shared prelude prepended

mod ctx;
mod material;
mod scene;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use material::{MaterialError, ShaderSource, ShaderStage, PRELUDE};
pub use scene::{MaterialId, MeshId, ObjectId, SceneRenderer};
pub use uniforms::{CameraUniform, ObjectUniform};
