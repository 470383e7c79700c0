//! Linked shader programs with resolved symbolic bindings.

use rustc_hash::FxHashMap;

use crate::gpu::driver::{
    AttributeLocation, DriverError, GpuDriver, ProgramHandle, ShaderStage,
    UniformLocation, UnitHandle,
};

/// A compiled-but-unlinked shader object.
///
/// Transient: shared (via `Rc`) by every program that links it, and released
/// by the assembly pipeline once all referencing programs have finished
/// linking. Never outlives assembly.
#[derive(Debug)]
pub struct ShaderUnit {
    /// Driver-side handle of the compiled object.
    pub handle: UnitHandle,
    /// Pipeline stage the unit was compiled for.
    pub stage: ShaderStage,
}

impl ShaderUnit {
    /// Compile `source` for `stage`.
    ///
    /// # Errors
    ///
    /// Propagates the driver's compile failure.
    pub fn compile<D: GpuDriver>(
        driver: &mut D,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self, DriverError> {
        let handle = driver.compile_shader(stage, source)?;
        Ok(Self { handle, stage })
    }
}

/// A linked program plus its symbolic-name → location tables.
///
/// Three instances live for the session: plain-texture, team-color and
/// alpha-mask. Owned by the resource set; destroyed exactly once at
/// shutdown, which implicitly invalidates every resolved location.
#[derive(Debug)]
pub struct ShaderProgram {
    /// Program identity used in diagnostics.
    pub name: &'static str,
    handle: ProgramHandle,
    uniforms: FxHashMap<&'static str, UniformLocation>,
    attributes: FxHashMap<&'static str, AttributeLocation>,
}

impl ShaderProgram {
    /// Link `vertex` and `fragment` into a named program and resolve every
    /// listed uniform and attribute by name.
    ///
    /// # Errors
    ///
    /// Link failure, or any name that does not resolve against the linked
    /// program (a shader/program source mismatch), is fatal.
    pub fn link<D: GpuDriver>(
        driver: &mut D,
        name: &'static str,
        vertex: &ShaderUnit,
        fragment: &ShaderUnit,
        uniform_names: &[&'static str],
        attribute_names: &[&'static str],
    ) -> Result<Self, DriverError> {
        debug_assert_eq!(vertex.stage, ShaderStage::Vertex);
        debug_assert_eq!(fragment.stage, ShaderStage::Fragment);

        let handle =
            driver.link_program(name, vertex.handle, fragment.handle)?;
        log::debug!("linked shader program '{name}'");

        let mut uniforms = FxHashMap::default();
        for &uname in uniform_names {
            let location = driver
                .uniform_location(handle, uname)
                .ok_or(DriverError::MissingUniform {
                    program: name,
                    name: uname,
                })?;
            let _ = uniforms.insert(uname, location);
        }

        let mut attributes = FxHashMap::default();
        for &aname in attribute_names {
            let location = driver
                .attribute_location(handle, aname)
                .ok_or(DriverError::MissingAttribute {
                    program: name,
                    name: aname,
                })?;
            let _ = attributes.insert(aname, location);
        }

        Ok(Self {
            name,
            handle,
            uniforms,
            attributes,
        })
    }

    /// Resolved location of a uniform, if it was requested at link time.
    #[must_use]
    pub fn uniform(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.get(name).copied()
    }

    /// Resolved location of a vertex attribute, if it was requested at link
    /// time.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<AttributeLocation> {
        self.attributes.get(name).copied()
    }

    /// Make this the active program for uniform uploads. The returned guard
    /// deactivates on drop, so no other program can be mutated by accident
    /// inside the bracket.
    pub fn activate<'a, D: GpuDriver>(
        &'a self,
        driver: &'a mut D,
    ) -> ActiveProgram<'a, D> {
        driver.activate(self.handle);
        ActiveProgram {
            driver,
            program: self,
        }
    }

    /// Release the driver-side program object.
    pub fn destroy<D: GpuDriver>(self, driver: &mut D) {
        driver.delete_program(self.handle);
    }
}

/// Scoped activation bracket around a [`ShaderProgram`].
///
/// Uniform uploads go through this guard so they can only ever hit the
/// program that is actually active. Dropping the guard deactivates.
pub struct ActiveProgram<'a, D: GpuDriver> {
    driver: &'a mut D,
    program: &'a ShaderProgram,
}

impl<D: GpuDriver> ActiveProgram<'_, D> {
    /// Upload an integer uniform (sampler unit binding).
    ///
    /// # Errors
    ///
    /// [`DriverError::MissingUniform`] if `name` was not resolved at link
    /// time.
    pub fn set_i32(
        &mut self,
        name: &'static str,
        value: i32,
    ) -> Result<(), DriverError> {
        let location = self.resolved(name)?;
        self.driver.set_uniform_i32(location, value);
        Ok(())
    }

    /// Upload a float uniform.
    ///
    /// # Errors
    ///
    /// [`DriverError::MissingUniform`] if `name` was not resolved at link
    /// time.
    pub fn set_f32(
        &mut self,
        name: &'static str,
        value: f32,
    ) -> Result<(), DriverError> {
        let location = self.resolved(name)?;
        self.driver.set_uniform_f32(location, value);
        Ok(())
    }

    /// Upload a vec4 array uniform.
    ///
    /// # Errors
    ///
    /// [`DriverError::MissingUniform`] if `name` was not resolved at link
    /// time.
    pub fn set_vec4_array(
        &mut self,
        name: &'static str,
        values: &[[f32; 4]],
    ) -> Result<(), DriverError> {
        let location = self.resolved(name)?;
        self.driver.set_uniform_vec4_array(location, values);
        Ok(())
    }

    fn resolved(
        &self,
        name: &'static str,
    ) -> Result<UniformLocation, DriverError> {
        self.program
            .uniform(name)
            .ok_or(DriverError::MissingUniform {
                program: self.program.name,
                name,
            })
    }
}

impl<D: GpuDriver> Drop for ActiveProgram<'_, D> {
    fn drop(&mut self) {
        self.driver.deactivate();
    }
}
