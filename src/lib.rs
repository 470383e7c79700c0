// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]

//! Startup/shutdown resource bootstrap for a tile-based rendering client.
//!
//! Tessera turns tabular terrain/blend metadata and shader source text into
//! a render-ready GPU resource set, and tears that set down
//! deterministically at the end of the session.
//!
//! # Key entry points
//!
//! - [`resources::ResourceSet`] - owns every long-lived resource; one
//!   `initialize`, one `shutdown` per session
//! - [`terrain::TerrainGrid`] - the validated tile grid
//! - [`gpu::assembly`] - the shader compile/link/bind/seed pipeline
//! - [`config::BootstrapConfig`] - asset paths, loadable from TOML
//!
//! # Architecture
//!
//! Everything runs synchronously on one thread: initialization completes
//! before the frame loop starts and teardown runs after it stops. The GPU
//! is reached only through the [`gpu::driver::GpuDriver`] seam; the `gl`
//! cargo feature provides an OpenGL implementation, and tests drive the
//! pipeline with a recording fake. There is no recoverable-error class:
//! a missing file, malformed record, or driver failure aborts the whole
//! bootstrap.

/// Asset input seams: file reads, record loading, texture creation.
pub mod assets;
/// Bootstrap configuration (asset paths).
pub mod config;
/// Frame-loop callback registration.
pub mod dispatch;
/// Crate error types.
pub mod error;
/// Driver seam, shader programs, assembly pipeline.
pub mod gpu;
/// Player-color palette and normalized color table.
pub mod palette;
/// Session resource ownership and lifecycle.
pub mod resources;
/// Terrain metadata, grid, and blend precedence.
pub mod terrain;
