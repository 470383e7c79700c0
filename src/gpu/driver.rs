//! The graphics-driver seam the shader assembly pipeline drives.
//!
//! The bootstrap never talks to a GPU API directly; everything goes through
//! [`GpuDriver`]. The `gl` cargo feature provides a real OpenGL
//! implementation ([`crate::gpu::gl_backend::GlDriver`]); tests use a
//! recording fake.

use std::fmt;

/// Shader pipeline stage a compiled unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage.
    Vertex,
    /// Fragment stage.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Opaque handle to a compiled-but-unlinked shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitHandle(pub u32);

/// Opaque handle to a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Resolved uniform location within a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// Resolved vertex-attribute location within a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeLocation(pub u32);

/// Opaque handle to a GPU texture object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Graphics-driver failures during shader assembly. Always fatal.
#[derive(Debug)]
pub enum DriverError {
    /// The driver rejected a shader source (syntax error etc.).
    Compile {
        /// Stage of the failing unit.
        stage: ShaderStage,
        /// Driver's info log for the failure.
        log: String,
    },
    /// Program linking failed.
    Link {
        /// Name of the failing program.
        program: &'static str,
        /// Driver's info log for the failure.
        log: String,
    },
    /// A uniform name did not resolve against a linked program.
    MissingUniform {
        /// Program the lookup ran against.
        program: &'static str,
        /// The unresolved symbolic name.
        name: &'static str,
    },
    /// An attribute name did not resolve against a linked program.
    MissingAttribute {
        /// Program the lookup ran against.
        program: &'static str,
        /// The unresolved symbolic name.
        name: &'static str,
    },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {log}")
            }
            Self::Link { program, log } => {
                write!(f, "program '{program}' failed to link: {log}")
            }
            Self::MissingUniform { program, name } => {
                write!(f, "program '{program}' has no uniform '{name}'")
            }
            Self::MissingAttribute { program, name } => {
                write!(f, "program '{program}' has no attribute '{name}'")
            }
        }
    }
}

impl std::error::Error for DriverError {}

/// The graphics primitives the assembly pipeline and teardown need.
///
/// Calls are issued serially from a single thread; implementations need no
/// internal synchronization. `delete_*` calls must tolerate being the last
/// reference to the object (driver-side deferred deletion is fine).
pub trait GpuDriver {
    /// Compile `source` as a shader of the given stage.
    ///
    /// # Errors
    ///
    /// [`DriverError::Compile`] if the driver rejects the source.
    fn compile_shader(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<UnitHandle, DriverError>;

    /// Link a vertex and a fragment unit into a program.
    ///
    /// # Errors
    ///
    /// [`DriverError::Link`] on link failure, tagged with `label`.
    fn link_program(
        &mut self,
        label: &'static str,
        vertex: UnitHandle,
        fragment: UnitHandle,
    ) -> Result<ProgramHandle, DriverError>;

    /// Look up a uniform location by name. `None` means the name does not
    /// exist in the linked program.
    fn uniform_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<UniformLocation>;

    /// Look up a vertex-attribute location by name.
    fn attribute_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<AttributeLocation>;

    /// Make `program` the active program for subsequent uniform uploads.
    fn activate(&mut self, program: ProgramHandle);

    /// Clear the active program.
    fn deactivate(&mut self);

    /// Upload a single integer uniform (texture sampler unit) to the active
    /// program.
    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32);

    /// Upload a single float uniform to the active program.
    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32);

    /// Upload an array of vec4 uniforms to the active program.
    fn set_uniform_vec4_array(
        &mut self,
        location: UniformLocation,
        values: &[[f32; 4]],
    );

    /// Release a compiled shader unit.
    fn delete_shader(&mut self, unit: UnitHandle);

    /// Release a linked program, invalidating its resolved locations.
    fn delete_program(&mut self, program: ProgramHandle);

    /// Release a texture object.
    fn delete_texture(&mut self, texture: TextureHandle);
}
