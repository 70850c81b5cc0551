//! # Airflow Panel Core Library
//!
//! Core functionality for the airflow fan/pressure control panel.
//!
//! This library provides:
//! - A typed telemetry snapshot with adapters for name/value rows and JSON
//! - Gauge geometry (value arcs, needle triangles, pressure bands)
//! - Status encoding for the fuse/feedback/watchdog indicators
//! - A drawing-surface abstraction and a renderer that drives it
//! - Click-to-simulate interactions and a demo telemetry source
//!
//! ## Example
//!
//! ```rust,ignore
//! use airflow_core::prelude::*;
//!
//! let mut snapshot = TelemetrySnapshot::from_json_str(&row)?;
//! let renderer = PanelRenderer::new(PanelLayout::default());
//! let mut surface = RecordingSurface::new();
//!
//! renderer.render(&snapshot, &mut surface);
//! renderer.handle_click(ClickTarget::PowerFan1, &mut snapshot, &mut surface);
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod demo;
pub mod gauge;
pub mod interaction;
pub mod render;
pub mod status;
pub mod surface;
pub mod telemetry;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ConfigError, PanelLayout};
    pub use crate::demo::DemoTelemetry;
    pub use crate::gauge::{
        compute_band_arcs, compute_indicator_triangle, compute_value_arc, ArcPath, GaugeConfig,
        Point, Polygon,
    };
    pub use crate::interaction::{apply_click, ClickTarget, InteractionError, RedrawSet};
    pub use crate::render::PanelRenderer;
    pub use crate::status::{classify, Indicator, IndicatorState, IndicatorStyle};
    pub use crate::surface::{DrawCommand, DrawingSurface, Paint, RecordingSurface, SceneSurface};
    pub use crate::telemetry::{TelemetryError, TelemetryField, TelemetrySnapshot};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
