//! Platform-specific translation into the platform-agnostic input types.

pub(crate) mod winit;
