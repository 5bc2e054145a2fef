//! Core shared types and errors (renderer-agnostic): math re-exports,
//! geometry errors and a few vector helpers.

pub use glam::{Vec2, Vec3, vec3};

use thiserror::Error;

pub mod math;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Attribute length mismatch: {what} has {actual} entries, expected {expected}")]
    AttributeLengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Triangle index count {0} is not a multiple of 3")]
    IndexCount(usize),

    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

impl GeometryError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type GeometryResult<T> = Result<T, GeometryError>;
