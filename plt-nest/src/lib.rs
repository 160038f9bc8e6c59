//! Decoding of loosely structured plotter (PLT) files into garment pattern pieces,
//! and bounding-box strip nesting of those pieces on a fixed-width fabric roll.
//!
//! The pipeline is: raw text → [`decoder::decode`] → [`entities::Piece`]s →
//! [`nesting::NestingEngine`] → [`entities::NestingResult`].

pub mod decoder;
pub mod entities;
pub mod geometry;
pub mod nesting;
pub mod report;
pub mod util;
pub mod worker;

/// Plotter units per meter of fabric used by this deployment.
pub const PLOTTER_UNITS_PER_METER: f64 = 1000.0;

/// Converts a physical fabric dimension (meters) into plotter units.
pub fn meters_to_plotter_units(meters: f64) -> f64 {
    meters * PLOTTER_UNITS_PER_METER
}

/// Converts a dimension in plotter units (e.g. a fabric length) back into meters.
pub fn plotter_units_to_meters(units: f64) -> f64 {
    units / PLOTTER_UNITS_PER_METER
}
