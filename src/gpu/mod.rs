//! GPU-facing half of the bootstrap: the driver seam, shader programs, and
//! the assembly pipeline.

/// The shader assembly pipeline.
pub mod assembly;
/// Driver seam and handle types.
pub mod driver;
/// Linked programs with resolved bindings.
pub mod program;

/// Real OpenGL backend for [`driver::GpuDriver`].
#[cfg(feature = "gl")]
pub mod gl_backend;

#[cfg(test)]
pub(crate) mod fake;

pub use assembly::{ShaderPrograms, ShaderSources, ALPHA_MARKER};
pub use driver::{GpuDriver, ShaderStage, TextureHandle};
pub use program::{ActiveProgram, ShaderProgram, ShaderUnit};
