//! OpenGL implementation of the [`GpuDriver`] seam, via `glow`.
//!
//! The caller owns context creation (windowing is out of scope); this
//! backend takes a current [`glow::Context`] and maps the crate's plain
//! integer handles onto glow's native objects.

use glow::HasContext;
use rustc_hash::FxHashMap;

use crate::gpu::driver::{
    AttributeLocation, DriverError, GpuDriver, ProgramHandle, ShaderStage,
    TextureHandle, UniformLocation, UnitHandle,
};

/// [`GpuDriver`] backed by a live OpenGL context.
pub struct GlDriver {
    gl: glow::Context,
    next_handle: u32,
    shaders: FxHashMap<u32, glow::Shader>,
    programs: FxHashMap<u32, glow::Program>,
    textures: FxHashMap<u32, glow::Texture>,
    uniforms: FxHashMap<i32, glow::UniformLocation>,
    next_uniform: i32,
}

impl GlDriver {
    /// Wrap a current GL context.
    #[must_use]
    pub fn new(gl: glow::Context) -> Self {
        Self {
            gl,
            next_handle: 0,
            shaders: FxHashMap::default(),
            programs: FxHashMap::default(),
            textures: FxHashMap::default(),
            uniforms: FxHashMap::default(),
            next_uniform: 0,
        }
    }

    /// The underlying context, for collaborators (e.g. a texture factory)
    /// that issue their own GL calls.
    #[must_use]
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }

    /// Adopt an externally created GL texture so teardown can release it
    /// through [`GpuDriver::delete_texture`].
    pub fn register_texture(
        &mut self,
        texture: glow::Texture,
    ) -> TextureHandle {
        let handle = self.fresh();
        let _ = self.textures.insert(handle, texture);
        TextureHandle(handle)
    }

    fn fresh(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    fn intern_uniform(
        &mut self,
        location: glow::UniformLocation,
    ) -> UniformLocation {
        self.next_uniform += 1;
        let _ = self.uniforms.insert(self.next_uniform, location);
        UniformLocation(self.next_uniform)
    }
}

const fn gl_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

impl GpuDriver for GlDriver {
    fn compile_shader(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<UnitHandle, DriverError> {
        let shader = unsafe {
            let shader = self.gl.create_shader(gl_stage(stage)).map_err(
                |log| DriverError::Compile { stage, log },
            )?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(DriverError::Compile { stage, log });
            }
            shader
        };
        let handle = self.fresh();
        let _ = self.shaders.insert(handle, shader);
        Ok(UnitHandle(handle))
    }

    fn link_program(
        &mut self,
        label: &'static str,
        vertex: UnitHandle,
        fragment: UnitHandle,
    ) -> Result<ProgramHandle, DriverError> {
        let (Some(&vert), Some(&frag)) =
            (self.shaders.get(&vertex.0), self.shaders.get(&fragment.0))
        else {
            return Err(DriverError::Link {
                program: label,
                log: "stale shader unit handle".to_owned(),
            });
        };
        let program = unsafe {
            let program =
                self.gl.create_program().map_err(|log| DriverError::Link {
                    program: label,
                    log,
                })?;
            self.gl.attach_shader(program, vert);
            self.gl.attach_shader(program, frag);
            self.gl.link_program(program);
            if !self.gl.get_program_link_status(program) {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(DriverError::Link {
                    program: label,
                    log,
                });
            }
            self.gl.detach_shader(program, vert);
            self.gl.detach_shader(program, frag);
            program
        };
        let handle = self.fresh();
        let _ = self.programs.insert(handle, program);
        Ok(ProgramHandle(handle))
    }

    fn uniform_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<UniformLocation> {
        let &program = self.programs.get(&program.0)?;
        let location =
            unsafe { self.gl.get_uniform_location(program, name) }?;
        Some(self.intern_uniform(location))
    }

    fn attribute_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Option<AttributeLocation> {
        let &program = self.programs.get(&program.0)?;
        unsafe { self.gl.get_attrib_location(program, name) }
            .map(AttributeLocation)
    }

    fn activate(&mut self, program: ProgramHandle) {
        if let Some(&program) = self.programs.get(&program.0) {
            unsafe { self.gl.use_program(Some(program)) };
        }
    }

    fn deactivate(&mut self) {
        unsafe { self.gl.use_program(None) };
    }

    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32) {
        if let Some(location) = self.uniforms.get(&location.0) {
            unsafe { self.gl.uniform_1_i32(Some(location), value) };
        }
    }

    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32) {
        if let Some(location) = self.uniforms.get(&location.0) {
            unsafe { self.gl.uniform_1_f32(Some(location), value) };
        }
    }

    fn set_uniform_vec4_array(
        &mut self,
        location: UniformLocation,
        values: &[[f32; 4]],
    ) {
        if let Some(location) = self.uniforms.get(&location.0) {
            let flat: Vec<f32> =
                values.iter().flat_map(|v| v.iter().copied()).collect();
            unsafe { self.gl.uniform_4_f32_slice(Some(location), &flat) };
        }
    }

    fn delete_shader(&mut self, unit: UnitHandle) {
        if let Some(shader) = self.shaders.remove(&unit.0) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if let Some(program) = self.programs.remove(&program.0) {
            unsafe { self.gl.delete_program(program) };
        }
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if let Some(texture) = self.textures.remove(&texture.0) {
            unsafe { self.gl.delete_texture(texture) };
        }
    }
}
