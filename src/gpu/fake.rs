//! Recording in-memory driver for tests.

use rustc_hash::FxHashSet;

use crate::gpu::driver::{
    AttributeLocation, DriverError, GpuDriver, ProgramHandle, ShaderStage,
    TextureHandle, UniformLocation, UnitHandle,
};

/// One recorded uniform upload, tagged with the program that was active
/// when it happened.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Upload {
    /// Integer (sampler unit) upload.
    I32 {
        /// Active program at upload time, if any.
        program: Option<u32>,
        /// Resolved location the upload hit.
        location: i32,
        /// Uploaded value.
        value: i32,
    },
    /// Float upload.
    F32 {
        /// Active program at upload time, if any.
        program: Option<u32>,
        /// Resolved location the upload hit.
        location: i32,
        /// Uploaded value.
        value: f32,
    },
    /// Vec4-array upload.
    Vec4Array {
        /// Active program at upload time, if any.
        program: Option<u32>,
        /// Resolved location the upload hit.
        location: i32,
        /// Uploaded slots.
        values: Vec<[f32; 4]>,
    },
}

/// A [`GpuDriver`] that records every call and can be told to fail.
#[derive(Debug, Default)]
pub(crate) struct FakeDriver {
    pub(crate) next_handle: u32,
    /// Compiled shader objects not yet deleted.
    pub(crate) live_shaders: FxHashSet<u32>,
    /// Linked program objects not yet deleted.
    pub(crate) live_programs: FxHashSet<u32>,
    /// Texture objects not yet deleted.
    pub(crate) live_textures: FxHashSet<u32>,
    /// Currently active program.
    pub(crate) active: Option<u32>,
    /// Every upload in call order.
    pub(crate) uploads: Vec<Upload>,
    /// Texture handles passed to `delete_texture`, in call order.
    pub(crate) deleted_textures: Vec<u32>,
    /// 1-based compile call number that should fail, if any.
    pub(crate) fail_compile_at: Option<usize>,
    pub(crate) compile_calls: usize,
    /// Program label whose link should fail, if any.
    pub(crate) fail_link: Option<&'static str>,
    /// Uniform names that resolve to nothing.
    pub(crate) missing_uniforms: Vec<&'static str>,
    pub(crate) next_location: i32,
}

impl FakeDriver {
    /// Mint a texture handle the way a texture factory would.
    pub(crate) fn make_texture(&mut self) -> TextureHandle {
        let handle = self.fresh();
        let _ = self.live_textures.insert(handle);
        TextureHandle(handle)
    }

    fn fresh(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl GpuDriver for FakeDriver {
    fn compile_shader(
        &mut self,
        stage: ShaderStage,
        _source: &str,
    ) -> Result<UnitHandle, DriverError> {
        self.compile_calls += 1;
        if self.fail_compile_at == Some(self.compile_calls) {
            return Err(DriverError::Compile {
                stage,
                log: "synthetic compile failure".to_owned(),
            });
        }
        let handle = self.fresh();
        let _ = self.live_shaders.insert(handle);
        Ok(UnitHandle(handle))
    }

    fn link_program(
        &mut self,
        label: &'static str,
        _vertex: UnitHandle,
        _fragment: UnitHandle,
    ) -> Result<ProgramHandle, DriverError> {
        if self.fail_link == Some(label) {
            return Err(DriverError::Link {
                program: label,
                log: "synthetic link failure".to_owned(),
            });
        }
        let handle = self.fresh();
        let _ = self.live_programs.insert(handle);
        Ok(ProgramHandle(handle))
    }

    fn uniform_location(
        &mut self,
        _program: ProgramHandle,
        name: &str,
    ) -> Option<UniformLocation> {
        if self.missing_uniforms.iter().any(|&m| m == name) {
            return None;
        }
        self.next_location += 1;
        Some(UniformLocation(self.next_location))
    }

    fn attribute_location(
        &mut self,
        _program: ProgramHandle,
        _name: &str,
    ) -> Option<AttributeLocation> {
        self.next_location += 1;
        Some(AttributeLocation(self.next_location as u32))
    }

    fn activate(&mut self, program: ProgramHandle) {
        self.active = Some(program.0);
    }

    fn deactivate(&mut self) {
        self.active = None;
    }

    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32) {
        self.uploads.push(Upload::I32 {
            program: self.active,
            location: location.0,
            value,
        });
    }

    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32) {
        self.uploads.push(Upload::F32 {
            program: self.active,
            location: location.0,
            value,
        });
    }

    fn set_uniform_vec4_array(
        &mut self,
        location: UniformLocation,
        values: &[[f32; 4]],
    ) {
        self.uploads.push(Upload::Vec4Array {
            program: self.active,
            location: location.0,
            values: values.to_vec(),
        });
    }

    fn delete_shader(&mut self, unit: UnitHandle) {
        let _ = self.live_shaders.remove(&unit.0);
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        let _ = self.live_programs.remove(&program.0);
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        let _ = self.live_textures.remove(&texture.0);
        self.deleted_textures.push(texture.0);
    }
}
