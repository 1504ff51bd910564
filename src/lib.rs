//! Dot Field RS - Engine Library
//! Pointer-reactive dot fields: grid layout, spatial index, per-frame
//! update, and egui rendering
//!
//! The host owns the frame loop and the drawing surface; it feeds each
//! [`field::DotField`] a stream of [`events::SurfaceEvent`]s and calls
//! `step` then `render` once per frame.

pub mod config;
pub mod events;
pub mod field;
pub mod presets;

pub use config::{AppConfig, FieldConfig};
pub use events::{EventTranslator, SurfaceEvent};
pub use field::DotField;
pub use presets::PresetType;
