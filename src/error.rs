//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::lighting::LightRole;

/// Errors produced by the orb crate.
#[derive(Debug)]
pub enum OrbError {
    /// A color edit carried a string the hex decoder could not parse.
    /// The edit is rejected; the prior color stays in effect.
    InvalidColorFormat(String),
    /// A light set handed to material construction lacks a required role.
    /// Fatal: there is no safe default for a missing light.
    MissingLightRole(LightRole),
    /// A negative frame delta was passed to the animation driver.
    /// The tick is ignored; no state changes.
    InvalidDelta(f32),
    /// The sphere was already inserted into a scene.
    AlreadyAttached,
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
}

impl fmt::Display for OrbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColorFormat(value) => {
                write!(f, "invalid color format: {value:?}")
            }
            Self::MissingLightRole(role) => {
                write!(f, "light set is missing required role {role}")
            }
            Self::InvalidDelta(delta) => {
                write!(f, "negative frame delta: {delta}")
            }
            Self::AlreadyAttached => {
                write!(f, "sphere is already attached to a scene")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
        }
    }
}

impl std::error::Error for OrbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Gpu(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for OrbError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for OrbError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
