//! Drawing surface
//!
//! The renderer never touches a document directly; it issues primitive
//! operations against a [`DrawingSurface`] keyed by element id. Two
//! implementations ship here: [`RecordingSurface`] keeps the raw command
//! stream, [`SceneSurface`] keeps the resulting per-element state.

use crate::gauge::{ArcPath, Polygon};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::trace;

/// Fill or stroke paint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    /// `#00FF00`
    Green,
    /// `#FF0000`
    Red,
    /// `#FFFF00`
    Yellow,
    /// `gray`, the unknown indicator state
    Gray,
    /// The `green` keyword used by the no-emergency disc
    NamedGreen,
    /// `url(#disk-gradient)`
    DiskGradient,
    /// `url(#red-gradient)`
    RedGradient,
    /// `url(#status-red-gradient)`
    StatusRedGradient,
}

impl Paint {
    /// CSS/SVG paint value
    pub fn css(&self) -> &'static str {
        match self {
            Paint::Green => "#00FF00",
            Paint::Red => "#FF0000",
            Paint::Yellow => "#FFFF00",
            Paint::Gray => "gray",
            Paint::NamedGreen => "green",
            Paint::DiskGradient => "url(#disk-gradient)",
            Paint::RedGradient => "url(#red-gradient)",
            Paint::StatusRedGradient => "url(#status-red-gradient)",
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css())
    }
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.css())
    }
}

/// Primitive operations the panel needs from whatever draws it.
pub trait DrawingSurface {
    /// Replace an arc path; [`ArcPath::Empty`] clears it
    fn set_arc_path(&mut self, id: &str, path: &ArcPath);

    /// Replace a triangle's vertices
    fn set_polygon(&mut self, id: &str, polygon: &Polygon);

    /// Replace text content
    fn set_text(&mut self, id: &str, text: &str);

    /// Replace the fill paint
    fn set_fill(&mut self, id: &str, paint: Paint);

    /// Replace the stroke paint
    fn set_stroke(&mut self, id: &str, paint: Paint);

    /// Opacity in `0.0..=1.0`
    fn set_opacity(&mut self, id: &str, opacity: f64);

    /// Add (`enabled`) or remove a class
    fn toggle_class(&mut self, id: &str, class: &str, enabled: bool);

    /// Show or hide
    fn set_visible(&mut self, id: &str, visible: bool);
}

/// One surface call, in serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// [`DrawingSurface::set_arc_path`]
    SetArcPath {
        /// Target element
        id: String,
        /// Path data, empty to clear
        d: String,
    },
    /// [`DrawingSurface::set_polygon`]
    SetPolygon {
        /// Target element
        id: String,
        /// `x,y` pairs separated by spaces
        points: String,
    },
    /// [`DrawingSurface::set_text`]
    SetText {
        /// Target element
        id: String,
        /// New text
        text: String,
    },
    /// [`DrawingSurface::set_fill`]
    SetFill {
        /// Target element
        id: String,
        /// New fill
        paint: Paint,
    },
    /// [`DrawingSurface::set_stroke`]
    SetStroke {
        /// Target element
        id: String,
        /// New stroke
        paint: Paint,
    },
    /// [`DrawingSurface::set_opacity`]
    SetOpacity {
        /// Target element
        id: String,
        /// New opacity
        opacity: f64,
    },
    /// [`DrawingSurface::toggle_class`]
    ToggleClass {
        /// Target element
        id: String,
        /// Class name
        class: String,
        /// Add when true, remove when false
        enabled: bool,
    },
    /// [`DrawingSurface::set_visible`]
    SetVisible {
        /// Target element
        id: String,
        /// Shown or hidden
        visible: bool,
    },
}

impl DrawCommand {
    /// Element the command targets
    pub fn id(&self) -> &str {
        match self {
            DrawCommand::SetArcPath { id, .. }
            | DrawCommand::SetPolygon { id, .. }
            | DrawCommand::SetText { id, .. }
            | DrawCommand::SetFill { id, .. }
            | DrawCommand::SetStroke { id, .. }
            | DrawCommand::SetOpacity { id, .. }
            | DrawCommand::ToggleClass { id, .. }
            | DrawCommand::SetVisible { id, .. } => id,
        }
    }
}

/// Surface that records every call in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands so far, oldest first
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands aimed at one element, oldest first
    pub fn for_element<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a DrawCommand> + 'a {
        self.commands.iter().filter(move |cmd| cmd.id() == id)
    }

    fn push(&mut self, command: DrawCommand) {
        trace!(?command, "draw");
        self.commands.push(command);
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_arc_path(&mut self, id: &str, path: &ArcPath) {
        self.push(DrawCommand::SetArcPath {
            id: id.to_string(),
            d: path.to_path_data(),
        });
    }

    fn set_polygon(&mut self, id: &str, polygon: &Polygon) {
        self.push(DrawCommand::SetPolygon {
            id: id.to_string(),
            points: polygon.to_points_string(),
        });
    }

    fn set_text(&mut self, id: &str, text: &str) {
        self.push(DrawCommand::SetText {
            id: id.to_string(),
            text: text.to_string(),
        });
    }

    fn set_fill(&mut self, id: &str, paint: Paint) {
        self.push(DrawCommand::SetFill {
            id: id.to_string(),
            paint,
        });
    }

    fn set_stroke(&mut self, id: &str, paint: Paint) {
        self.push(DrawCommand::SetStroke {
            id: id.to_string(),
            paint,
        });
    }

    fn set_opacity(&mut self, id: &str, opacity: f64) {
        self.push(DrawCommand::SetOpacity {
            id: id.to_string(),
            opacity,
        });
    }

    fn toggle_class(&mut self, id: &str, class: &str, enabled: bool) {
        self.push(DrawCommand::ToggleClass {
            id: id.to_string(),
            class: class.to_string(),
            enabled,
        });
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        self.push(DrawCommand::SetVisible {
            id: id.to_string(),
            visible,
        });
    }
}

/// Last known attributes of one element
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementState {
    /// Arc path data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Polygon points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<String>,
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fill paint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    /// Stroke paint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Paint>,
    /// Opacity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Classes currently set
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub classes: BTreeSet<String>,
    /// Shown or hidden, unset until first toggled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ElementState {
    /// Whether `class` is set
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Surface that keeps the resulting state of every element, like a
/// retained document would.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneSurface {
    elements: BTreeMap<String, ElementState>,
}

impl SceneSurface {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// State of one element, if it was ever drawn
    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    /// All drawn elements by id
    pub fn elements(&self) -> impl Iterator<Item = (&str, &ElementState)> {
        self.elements.iter().map(|(id, state)| (id.as_str(), state))
    }

    fn entry(&mut self, id: &str) -> &mut ElementState {
        self.elements.entry(id.to_string()).or_default()
    }
}

impl DrawingSurface for SceneSurface {
    fn set_arc_path(&mut self, id: &str, path: &ArcPath) {
        self.entry(id).path = Some(path.to_path_data());
    }

    fn set_polygon(&mut self, id: &str, polygon: &Polygon) {
        self.entry(id).points = Some(polygon.to_points_string());
    }

    fn set_text(&mut self, id: &str, text: &str) {
        self.entry(id).text = Some(text.to_string());
    }

    fn set_fill(&mut self, id: &str, paint: Paint) {
        self.entry(id).fill = Some(paint);
    }

    fn set_stroke(&mut self, id: &str, paint: Paint) {
        self.entry(id).stroke = Some(paint);
    }

    fn set_opacity(&mut self, id: &str, opacity: f64) {
        self.entry(id).opacity = Some(opacity);
    }

    fn toggle_class(&mut self, id: &str, class: &str, enabled: bool) {
        let element = self.entry(id);
        // Only touch the class set when membership actually changes
        if enabled && !element.has_class(class) {
            element.classes.insert(class.to_string());
        } else if !enabled && element.has_class(class) {
            element.classes.remove(class);
        }
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        self.entry(id).visible = Some(visible);
    }
}
