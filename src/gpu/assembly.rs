//! Shader assembly: compile, link, resolve bindings, seed constants.
//!
//! Per program the pipeline is a straight line that is terminal on success
//! and fatal on failure: sources → compiled units → linked programs with
//! resolved bindings → seeded constants. Compiled units are transient; they
//! are released as soon as every program referencing them has linked, and
//! they are also released on every failure path so a failed assembly leaks
//! nothing.

use std::path::Path;
use std::rc::Rc;

use crate::assets::FileReader;
use crate::error::ConfigError;
use crate::gpu::driver::{DriverError, GpuDriver, ShaderStage};
use crate::gpu::program::{ActiveProgram, ShaderProgram, ShaderUnit};
use crate::palette::{PlayerColorTable, PLAYER_COLOR_SLOTS};

/// Alpha value marking pixels the team-color program tints. Pixels at or
/// above this threshold keep their texture color.
pub const ALPHA_MARKER: f32 = 254.0 / 255.0;

/// Canonical shader source file names, resolved under the configured
/// shader directory.
pub const SHADER_FILES: ShaderFileNames = ShaderFileNames {
    texture_vertex: "maptexture.vert.glsl",
    texture_fragment: "maptexture.frag.glsl",
    team_color_fragment: "teamcolors.frag.glsl",
    alpha_mask_vertex: "alphamask.vert.glsl",
    alpha_mask_fragment: "alphamask.frag.glsl",
};

/// File names of the five required shader sources.
#[derive(Debug, Clone, Copy)]
pub struct ShaderFileNames {
    /// Plain-texture vertex stage (shared with the team-color program).
    pub texture_vertex: &'static str,
    /// Plain-texture fragment stage.
    pub texture_fragment: &'static str,
    /// Team-color fragment stage.
    pub team_color_fragment: &'static str,
    /// Alpha-mask vertex stage.
    pub alpha_mask_vertex: &'static str,
    /// Alpha-mask fragment stage.
    pub alpha_mask_fragment: &'static str,
}

/// The five raw shader source texts.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    /// Plain-texture vertex source.
    pub texture_vertex: String,
    /// Plain-texture fragment source.
    pub texture_fragment: String,
    /// Team-color fragment source.
    pub team_color_fragment: String,
    /// Alpha-mask vertex source.
    pub alpha_mask_vertex: String,
    /// Alpha-mask fragment source.
    pub alpha_mask_fragment: String,
}

impl ShaderSources {
    /// Read the five canonical source files from `shader_dir`.
    ///
    /// # Errors
    ///
    /// A missing or non-UTF-8 source file is fatal.
    pub fn load<R: FileReader>(
        reader: &R,
        shader_dir: &Path,
    ) -> Result<Self, ConfigError> {
        let read = |file: &'static str| -> Result<String, ConfigError> {
            let path = shader_dir.join(file);
            let bytes = reader.read_whole_file(&path)?;
            String::from_utf8(bytes)
                .map_err(|_| ConfigError::NotUtf8 { path })
        };
        Ok(Self {
            texture_vertex: read(SHADER_FILES.texture_vertex)?,
            texture_fragment: read(SHADER_FILES.texture_fragment)?,
            team_color_fragment: read(SHADER_FILES.team_color_fragment)?,
            alpha_mask_vertex: read(SHADER_FILES.alpha_mask_vertex)?,
            alpha_mask_fragment: read(SHADER_FILES.alpha_mask_fragment)?,
        })
    }
}

/// The three session-lifetime programs produced by assembly.
#[derive(Debug)]
pub struct ShaderPrograms {
    /// Renders simple textures.
    pub plain_texture: ShaderProgram,
    /// Tints alpha-marked pixels with the owning player's color.
    pub team_color: ShaderProgram,
    /// Draws textures through a separate alpha mask.
    pub alpha_mask: ShaderProgram,
}

impl ShaderPrograms {
    /// Release all three driver-side program objects, invalidating their
    /// resolved locations.
    pub fn destroy<D: GpuDriver>(self, driver: &mut D) {
        self.plain_texture.destroy(driver);
        self.team_color.destroy(driver);
        self.alpha_mask.destroy(driver);
    }
}

/// The five compiled units, alive only for the duration of assembly.
///
/// The plain-texture vertex unit is shared by two programs, so units are
/// held behind `Rc`: a unit's driver object is deleted only once the last
/// reference is gone.
struct CompiledUnits {
    texture_vertex: Rc<ShaderUnit>,
    texture_fragment: Rc<ShaderUnit>,
    team_color_fragment: Rc<ShaderUnit>,
    alpha_mask_vertex: Rc<ShaderUnit>,
    alpha_mask_fragment: Rc<ShaderUnit>,
}

impl CompiledUnits {
    fn compile<D: GpuDriver>(
        driver: &mut D,
        sources: &ShaderSources,
    ) -> Result<Self, DriverError> {
        let texture_vertex = ShaderUnit::compile(
            driver,
            ShaderStage::Vertex,
            &sources.texture_vertex,
        )?;
        let texture_fragment = compile_or_release(
            driver,
            ShaderStage::Fragment,
            &sources.texture_fragment,
            &[&texture_vertex],
        )?;
        let team_color_fragment = compile_or_release(
            driver,
            ShaderStage::Fragment,
            &sources.team_color_fragment,
            &[&texture_vertex, &texture_fragment],
        )?;
        let alpha_mask_vertex = compile_or_release(
            driver,
            ShaderStage::Vertex,
            &sources.alpha_mask_vertex,
            &[&texture_vertex, &texture_fragment, &team_color_fragment],
        )?;
        let alpha_mask_fragment = compile_or_release(
            driver,
            ShaderStage::Fragment,
            &sources.alpha_mask_fragment,
            &[
                &texture_vertex,
                &texture_fragment,
                &team_color_fragment,
                &alpha_mask_vertex,
            ],
        )?;
        Ok(Self {
            texture_vertex: Rc::new(texture_vertex),
            texture_fragment: Rc::new(texture_fragment),
            team_color_fragment: Rc::new(team_color_fragment),
            alpha_mask_vertex: Rc::new(alpha_mask_vertex),
            alpha_mask_fragment: Rc::new(alpha_mask_fragment),
        })
    }

    /// Release every unit whose last reference this is. After linking the
    /// programs' compiled-binary state is self-contained, so this runs
    /// unconditionally once linking is over.
    fn release<D: GpuDriver>(self, driver: &mut D) {
        for unit in [
            self.texture_vertex,
            self.texture_fragment,
            self.team_color_fragment,
            self.alpha_mask_vertex,
            self.alpha_mask_fragment,
        ] {
            match Rc::try_unwrap(unit) {
                Ok(unit) => driver.delete_shader(unit.handle),
                Err(shared) => log::warn!(
                    "shader unit {:?} still referenced at release",
                    shared.handle
                ),
            }
        }
    }
}

/// Compile one stage, releasing the `earlier` units on failure so a partial
/// compile never leaks.
fn compile_or_release<D: GpuDriver>(
    driver: &mut D,
    stage: ShaderStage,
    source: &str,
    earlier: &[&ShaderUnit],
) -> Result<ShaderUnit, DriverError> {
    match ShaderUnit::compile(driver, stage, source) {
        Ok(unit) => Ok(unit),
        Err(e) => {
            for unit in earlier {
                driver.delete_shader(unit.handle);
            }
            Err(e)
        }
    }
}

/// Assemble the three programs from `sources` and seed their constant
/// uniform state, including the one-time player-color table upload.
///
/// All-or-nothing: on any compile, link, or binding failure every unit and
/// every already-linked program is released before the error propagates.
///
/// # Errors
///
/// The driver's compile/link failure, or an unresolved uniform/attribute
/// name, tagged with the offending program.
pub fn assemble<D: GpuDriver>(
    driver: &mut D,
    sources: &ShaderSources,
    player_colors: &PlayerColorTable,
) -> Result<ShaderPrograms, DriverError> {
    let units = CompiledUnits::compile(driver, sources)?;
    let result = link_programs(driver, &units, player_colors);
    units.release(driver);
    if result.is_ok() {
        log::info!("shader programs assembled");
    }
    result
}

fn link_programs<D: GpuDriver>(
    driver: &mut D,
    units: &CompiledUnits,
    player_colors: &PlayerColorTable,
) -> Result<ShaderPrograms, DriverError> {
    let plain_texture = link_plain_texture(driver, units)?;
    let team_color = match link_team_color(driver, units, player_colors) {
        Ok(program) => program,
        Err(e) => {
            plain_texture.destroy(driver);
            return Err(e);
        }
    };
    let alpha_mask = match link_alpha_mask(driver, units) {
        Ok(program) => program,
        Err(e) => {
            plain_texture.destroy(driver);
            team_color.destroy(driver);
            return Err(e);
        }
    };
    Ok(ShaderPrograms {
        plain_texture,
        team_color,
        alpha_mask,
    })
}

fn link_plain_texture<D: GpuDriver>(
    driver: &mut D,
    units: &CompiledUnits,
) -> Result<ShaderProgram, DriverError> {
    let program = ShaderProgram::link(
        driver,
        "plain-texture",
        &units.texture_vertex,
        &units.texture_fragment,
        &["texture"],
        &["tex_coordinates"],
    )?;
    let seeded = {
        let mut active = program.activate(driver);
        active.set_i32("texture", 0)
    };
    finish(driver, program, seeded)
}

fn link_team_color<D: GpuDriver>(
    driver: &mut D,
    units: &CompiledUnits,
    player_colors: &PlayerColorTable,
) -> Result<ShaderProgram, DriverError> {
    // The vertex stage is the plain-texture one; hold a shared reference
    // for the duration of the link.
    let vertex = Rc::clone(&units.texture_vertex);
    let program = ShaderProgram::link(
        driver,
        "team-color",
        &vertex,
        &units.team_color_fragment,
        &["texture", "player_number", "alpha_marker", "player_color"],
        &["tex_coordinates"],
    )?;
    let seeded = {
        let mut active = program.activate(driver);
        seed_team_color(&mut active, player_colors)
    };
    finish(driver, program, seeded)
}

fn link_alpha_mask<D: GpuDriver>(
    driver: &mut D,
    units: &CompiledUnits,
) -> Result<ShaderProgram, DriverError> {
    let program = ShaderProgram::link(
        driver,
        "alpha-mask",
        &units.alpha_mask_vertex,
        &units.alpha_mask_fragment,
        &["show_mask", "base_texture", "mask_texture"],
        &["base_tex_coordinates", "mask_tex_coordinates"],
    )?;
    let seeded = {
        let mut active = program.activate(driver);
        seed_alpha_mask(&mut active)
    };
    finish(driver, program, seeded)
}

/// Constant uniforms for the team-color program: sampler unit, the alpha
/// tint threshold, and the one-time 64-slot color-table upload.
fn seed_team_color<D: GpuDriver>(
    active: &mut ActiveProgram<'_, D>,
    player_colors: &PlayerColorTable,
) -> Result<(), DriverError> {
    debug_assert_eq!(player_colors.slots().len(), PLAYER_COLOR_SLOTS);
    active.set_i32("texture", 0)?;
    active.set_f32("alpha_marker", ALPHA_MARKER)?;
    active.set_vec4_array("player_color", player_colors.slots())
}

/// Sampler units for the alpha-mask program: base texture on unit 0, mask
/// on unit 1.
fn seed_alpha_mask<D: GpuDriver>(
    active: &mut ActiveProgram<'_, D>,
) -> Result<(), DriverError> {
    active.set_i32("base_texture", 0)?;
    active.set_i32("mask_texture", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::fake::{FakeDriver, Upload};
    use crate::palette::PlayerColorEntry;

    fn sources() -> ShaderSources {
        ShaderSources {
            texture_vertex: "void main() {} // tex vert".to_owned(),
            texture_fragment: "void main() {} // tex frag".to_owned(),
            team_color_fragment: "void main() {} // team frag".to_owned(),
            alpha_mask_vertex: "void main() {} // mask vert".to_owned(),
            alpha_mask_fragment: "void main() {} // mask frag".to_owned(),
        }
    }

    fn palette() -> PlayerColorTable {
        let entries = [PlayerColorEntry {
            index: 5,
            r: 10,
            g: 20,
            b: 30,
            a: 255,
        }];
        PlayerColorTable::from_entries(&entries).unwrap()
    }

    #[test]
    fn test_successful_assembly_links_three_programs_and_frees_units() {
        let mut driver = FakeDriver::default();
        let programs =
            assemble(&mut driver, &sources(), &palette()).unwrap();

        assert_eq!(driver.live_programs.len(), 3);
        // Every transient unit was released once linking finished.
        assert!(driver.live_shaders.is_empty());
        // The activate/deactivate bracket was closed after each seeding.
        assert!(driver.active.is_none());
        assert_eq!(programs.plain_texture.name, "plain-texture");
        assert_eq!(programs.team_color.name, "team-color");
        assert_eq!(programs.alpha_mask.name, "alpha-mask");
    }

    #[test]
    fn test_bindings_resolved_by_symbolic_name() {
        let mut driver = FakeDriver::default();
        let programs =
            assemble(&mut driver, &sources(), &palette()).unwrap();

        assert!(programs.plain_texture.uniform("texture").is_some());
        assert!(programs
            .plain_texture
            .attribute("tex_coordinates")
            .is_some());
        assert!(programs.team_color.uniform("player_color").is_some());
        assert!(programs.team_color.uniform("alpha_marker").is_some());
        assert!(programs.alpha_mask.uniform("show_mask").is_some());
        assert!(programs
            .alpha_mask
            .attribute("mask_tex_coordinates")
            .is_some());
        // Names never requested are absent.
        assert!(programs.plain_texture.uniform("player_color").is_none());
    }

    #[test]
    fn test_constant_seeding_runs_inside_activation_bracket() {
        let mut driver = FakeDriver::default();
        let _programs =
            assemble(&mut driver, &sources(), &palette()).unwrap();

        // Every upload happened while some program was active.
        assert!(driver
            .uploads
            .iter()
            .all(|u| match u {
                Upload::I32 { program, .. }
                | Upload::F32 { program, .. }
                | Upload::Vec4Array { program, .. } => program.is_some(),
            }));

        // The team-color program got the threshold and the full table.
        let marker = driver.uploads.iter().find_map(|u| match u {
            Upload::F32 { value, .. } => Some(*value),
            _ => None,
        });
        assert_eq!(marker, Some(ALPHA_MARKER));

        let table = driver.uploads.iter().find_map(|u| match u {
            Upload::Vec4Array { values, .. } => Some(values.clone()),
            _ => None,
        });
        let table = table.unwrap();
        assert_eq!(table.len(), PLAYER_COLOR_SLOTS);
        assert_eq!(
            table[5],
            [10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 1.0]
        );

        // Sampler units 0 and 1 were both seeded (1 only for the mask).
        let sampler_units: Vec<i32> = driver
            .uploads
            .iter()
            .filter_map(|u| match u {
                Upload::I32 { value, .. } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(sampler_units, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_compile_failure_releases_prior_units_and_links_nothing() {
        let mut driver = FakeDriver {
            fail_compile_at: Some(3),
            ..Default::default()
        };
        let err =
            assemble(&mut driver, &sources(), &palette()).unwrap_err();

        assert!(matches!(err, DriverError::Compile { .. }));
        assert!(driver.live_shaders.is_empty());
        assert!(driver.live_programs.is_empty());
        assert!(driver.uploads.is_empty());
    }

    #[test]
    fn test_link_failure_destroys_already_linked_programs() {
        let mut driver = FakeDriver {
            fail_link: Some("team-color"),
            ..Default::default()
        };
        let err =
            assemble(&mut driver, &sources(), &palette()).unwrap_err();

        assert!(
            matches!(err, DriverError::Link { program, .. } if program == "team-color")
        );
        // The plain-texture program linked first and was torn down again.
        assert!(driver.live_programs.is_empty());
        assert!(driver.live_shaders.is_empty());
    }

    #[test]
    fn test_unresolved_uniform_is_fatal_with_program_identity() {
        let mut driver = FakeDriver {
            missing_uniforms: vec!["player_color"],
            ..Default::default()
        };
        let err =
            assemble(&mut driver, &sources(), &palette()).unwrap_err();

        match err {
            DriverError::MissingUniform { program, name } => {
                assert_eq!(program, "team-color");
                assert_eq!(name, "player_color");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(driver.live_programs.is_empty());
        assert!(driver.live_shaders.is_empty());
    }

    #[test]
    fn test_source_loading_uses_canonical_file_names() {
        use crate::assets::FileReader;
        use crate::error::ConfigError;
        use std::path::{Path, PathBuf};

        struct MapReader(Vec<(PathBuf, &'static str)>);
        impl FileReader for MapReader {
            fn read_whole_file(
                &self,
                path: &Path,
            ) -> Result<Vec<u8>, ConfigError> {
                self.0
                    .iter()
                    .find(|(p, _)| p == path)
                    .map(|(_, text)| text.as_bytes().to_vec())
                    .ok_or_else(|| ConfigError::Io {
                        path: path.to_path_buf(),
                        source: std::io::Error::from(
                            std::io::ErrorKind::NotFound,
                        ),
                    })
            }
        }

        let dir = Path::new("shaders");
        let reader = MapReader(vec![
            (dir.join(SHADER_FILES.texture_vertex), "tv"),
            (dir.join(SHADER_FILES.texture_fragment), "tf"),
            (dir.join(SHADER_FILES.team_color_fragment), "cf"),
            (dir.join(SHADER_FILES.alpha_mask_vertex), "av"),
            (dir.join(SHADER_FILES.alpha_mask_fragment), "af"),
        ]);
        let loaded = ShaderSources::load(&reader, dir).unwrap();
        assert_eq!(loaded.texture_vertex, "tv");
        assert_eq!(loaded.alpha_mask_fragment, "af");

        // A missing source file is fatal.
        let empty = MapReader(Vec::new());
        assert!(ShaderSources::load(&empty, dir).is_err());
    }
}

/// A program only survives if its constant seeding succeeded.
fn finish<D: GpuDriver>(
    driver: &mut D,
    program: ShaderProgram,
    seeded: Result<(), DriverError>,
) -> Result<ShaderProgram, DriverError> {
    match seeded {
        Ok(()) => Ok(program),
        Err(e) => {
            program.destroy(driver);
            Err(e)
        }
    }
}
