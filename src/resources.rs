//! Session resource ownership: one initialization, one teardown.
//!
//! [`ResourceSet`] is the single authoritative owner of every long-lived
//! resource the bootstrap produces. There are no ambient globals; the
//! frame-loop driver holds the set for the session and consumes it on
//! shutdown. Initialization is all-or-nothing — there is no partial
//! rollback path, a failure terminates the session before it starts.

use std::path::Path;

use crate::assets::{load_records, FileReader, TextureFactory};
use crate::config::BootstrapConfig;
use crate::dispatch::{FrameDispatcher, FrameHandlers};
use crate::error::{ConfigError, InitError};
use crate::gpu::assembly::{self, ShaderPrograms, ShaderSources};
use crate::gpu::driver::{GpuDriver, TextureHandle};
use crate::palette::{PlayerColorEntry, PlayerColorTable};
use crate::terrain::seed::TILE_MATRIX;
use crate::terrain::{
    BlendingModeRecord, PriorityOrdering, TerrainGrid, TerrainTypeRecord,
    BLEND_MODE_COUNT, GRID_SIZE,
};

/// Every long-lived resource of the render session.
#[derive(Debug)]
pub struct ResourceSet {
    /// Splash/logo texture.
    pub logo_texture: TextureHandle,
    /// Player-colored UI texture.
    pub ui_texture: TextureHandle,
    /// The seeded terrain grid.
    pub terrain: TerrainGrid,
    /// Blend draw-precedence ordering, consumed by the blending renderer.
    pub priority: PriorityOrdering,
    /// The three linked shader programs.
    pub programs: ShaderPrograms,
    terrain_textures: Vec<TextureHandle>,
    blending_textures: Vec<TextureHandle>,
    // Teardown bounds snapshotted when the arrays were created. Destruction
    // loops read these, never the current metadata-table sizes.
    terrain_texture_count: usize,
    blend_texture_count: usize,
}

impl ResourceSet {
    /// Build the full resource set. The step order is contractual:
    /// standalone textures, terrain metadata (with per-type and per-blend
    /// texture creation), grid build and seed, player-color table, shader
    /// assembly, callback registration.
    ///
    /// # Errors
    ///
    /// Any missing/malformed input or driver failure aborts the whole
    /// bootstrap; nothing about a failed initialization is retried.
    pub fn initialize<D, R, F>(
        driver: &mut D,
        reader: &R,
        textures: &mut F,
        dispatcher: &mut FrameDispatcher,
        handlers: FrameHandlers,
        config: &BootstrapConfig,
    ) -> Result<Self, InitError>
    where
        D: GpuDriver,
        R: FileReader,
        F: TextureFactory,
    {
        let logo_texture =
            textures.create_texture(&config.logo_texture, false)?;
        let ui_texture = textures.create_texture(&config.ui_texture, true)?;

        let terrain_types: Vec<TerrainTypeRecord> =
            load_records(reader, &config.terrain_meta)?;
        let blending_modes: Vec<BlendingModeRecord> =
            load_records(reader, &config.blending_meta)?;
        if blending_modes.len() != BLEND_MODE_COUNT {
            return Err(ConfigError::RecordCountMismatch {
                table: "blending modes",
                expected: BLEND_MODE_COUNT,
                actual: blending_modes.len(),
            }
            .into());
        }

        let terrain_textures = create_table_textures(
            textures,
            &config.texture_dir,
            terrain_types.iter().map(|t| t.texture_ref.as_str()),
        )?;
        let blending_textures = create_table_textures(
            textures,
            &config.texture_dir,
            blending_modes.iter().map(|m| m.texture_ref.as_str()),
        )?;
        let terrain_texture_count = terrain_textures.len();
        let blend_texture_count = blending_textures.len();

        let priority = PriorityOrdering::resolve(&terrain_types);

        let mut terrain =
            TerrainGrid::new(GRID_SIZE, terrain_types, blending_modes);
        terrain.seed_from_matrix(&TILE_MATRIX)?;

        let entries: Vec<PlayerColorEntry> =
            load_records(reader, &config.player_palette)?;
        let player_colors = PlayerColorTable::from_entries(&entries)?;

        let sources = ShaderSources::load(reader, &config.shader_dir)?;
        let programs = assembly::assemble(driver, &sources, &player_colors)?;

        dispatcher.register(handlers);

        log::info!(
            "resource set initialized: {} terrain types, {} blending modes, {} player colors",
            terrain.terrain_type_count(),
            terrain.blending_mode_count(),
            entries.len()
        );

        Ok(Self {
            logo_texture,
            ui_texture,
            terrain,
            priority,
            programs,
            terrain_textures,
            blending_textures,
            terrain_texture_count,
            blend_texture_count,
        })
    }

    /// Per-terrain-type texture count snapshotted at load time.
    #[must_use]
    pub fn terrain_texture_count(&self) -> usize {
        self.terrain_texture_count
    }

    /// Per-blending-mode texture count snapshotted at load time.
    #[must_use]
    pub fn blend_texture_count(&self) -> usize {
        self.blend_texture_count
    }

    /// Release everything, in a fixed order that is safe under the
    /// ownership rules: standalone textures, then the three programs
    /// (which invalidates their resolved locations), then the per-type and
    /// per-blend texture arrays bounded by their load-time snapshots, then
    /// the priority ordering last. Teardown never fails.
    pub fn shutdown<D: GpuDriver>(self, driver: &mut D) {
        let Self {
            logo_texture,
            ui_texture,
            terrain,
            priority,
            programs,
            terrain_textures,
            blending_textures,
            terrain_texture_count,
            blend_texture_count,
        } = self;

        driver.delete_texture(logo_texture);
        driver.delete_texture(ui_texture);

        programs.destroy(driver);

        for texture in terrain_textures.iter().take(terrain_texture_count) {
            driver.delete_texture(*texture);
        }
        for texture in blending_textures.iter().take(blend_texture_count) {
            driver.delete_texture(*texture);
        }

        drop(terrain);
        drop(priority);
        log::info!("resource set released");
    }
}

/// Create one texture per metadata row, resolving refs under `texture_dir`.
/// The returned vector's length is the load-time snapshot teardown uses.
fn create_table_textures<'a, F, I>(
    textures: &mut F,
    texture_dir: &Path,
    refs: I,
) -> Result<Vec<TextureHandle>, ConfigError>
where
    F: TextureFactory,
    I: Iterator<Item = &'a str>,
{
    let mut handles = Vec::new();
    for texture_ref in refs {
        handles
            .push(textures.create_texture(&texture_dir.join(texture_ref), false)?);
    }
    Ok(handles)
}
