//! GPU rendering subsystem.
//!
//! Game code talks to a [`RenderContext`]: a narrow, GL-flavoured capability
//! interface of "set uniform by slot, bind texture, draw mesh" calls. The
//! [`DrawRecorder`] implements it on the CPU by snapshotting the current
//! uniform state at every draw; the [`MeshRenderer`] replays a recording on
//! the GPU in one depth-tested render pass.
//!
//! Convention:
//! - right-handed world space, camera looking down -Z
//! - matrices are `glam` column-major and uploaded as-is

mod bindings;
mod context;
mod ctx;
mod mesh;
mod mesh_renderer;
mod recorder;
mod texture;
mod uniforms;

pub use bindings::{Attribute, ProgramBindings, ProgramInterface, Uniform};
pub use context::{Fill, MeshId, RenderContext, TextureId};
pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshData, Topology, Vertex};
pub use mesh_renderer::{MeshRenderer, MESH_PROGRAM};
pub use recorder::{DrawRecord, DrawRecorder};
pub use texture::TextureImage;
pub use uniforms::{DrawUniforms, UniformState};
