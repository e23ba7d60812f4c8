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
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math allowances
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

//! Procedurally displaced, custom-lit sphere renderer built on wgpu.
//!
//! The crate owns one sphere: its tessellated geometry, a shader-driven
//! [`material::SurfaceMaterial`], two analytically-positioned lights, and a
//! per-frame animation update. The heart of the crate is the uniform
//! synchronization scheme — a small set of tunable values (light color,
//! intensity, angular position, distortion/displacement parameters, elapsed
//! time) mapped deterministically onto GPU-visible uniform state, with
//! interactive edits propagating without reallocating GPU resources.
//!
//! # Key entry points
//!
//! - [`sphere::Sphere`] - the sphere body and its construction flow
//! - [`material::SurfaceMaterial`] - the uniform table and change
//!   notifications
//! - [`lighting::LightSet`] - the key/fill light pair
//! - [`tuning::DebugBindings`] - declarative wiring to an interactive
//!   parameter panel
//! - [`options::Options`] - runtime configuration (lighting, shape)
//!
//! # Architecture
//!
//! Construction runs lights → material → geometry → scene attach; an
//! optional debug panel binds last, since its rows reference material
//! uniforms that must already exist. At runtime the host calls
//! [`sphere::Sphere::update`] once per frame with its clock delta; that is
//! the only mutation path outside of edit notifications.

pub mod error;
pub mod geometry;
pub mod gpu;
pub mod lighting;
pub mod material;
pub mod options;
pub mod scene;
pub mod sphere;
pub mod tuning;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::OrbError;
pub use sphere::Sphere;
