//! Gauge geometry for the panel's circular dials.
//!
//! Both dials share one parameterised computation driven by [`GaugeConfig`]:
//! a value arc, a needle triangle, and for the pressure dial the four
//! threshold bands around the rim.

mod geometry;
mod pressure;
mod types;

pub use geometry::*;
pub use pressure::*;
pub use types::*;
