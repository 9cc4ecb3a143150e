//! The two screen variants, expressed as data over the generic sequencer:
//! phase enums, property keys, timelines, and target mappers. Rendering
//! stays outside — each screen exposes a per-frame view snapshot for the
//! host to draw.

pub mod login;
pub mod splash;
