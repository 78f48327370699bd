//! Preset sail outlines offered by the shape picker.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::model::Point;

/// Side of the square box every preset is laid out in (px).
pub const PRESET_BOX: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetShape {
    Triangle,
    Square,
    Rectangle,
    Trapezoid,
    Pentagon,
    Hexagon,
}

impl PresetShape {
    pub const ALL: [PresetShape; 6] = [
        PresetShape::Triangle,
        PresetShape::Square,
        PresetShape::Rectangle,
        PresetShape::Trapezoid,
        PresetShape::Pentagon,
        PresetShape::Hexagon,
    ];

    pub fn from_name(name: &str) -> Option<PresetShape> {
        match name {
            "triangle" => Some(PresetShape::Triangle),
            "square" => Some(PresetShape::Square),
            "rectangle" => Some(PresetShape::Rectangle),
            "trapezoid" => Some(PresetShape::Trapezoid),
            "pentagon" => Some(PresetShape::Pentagon),
            "hexagon" => Some(PresetShape::Hexagon),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PresetShape::Triangle => "triangle",
            PresetShape::Square => "square",
            PresetShape::Rectangle => "rectangle",
            PresetShape::Trapezoid => "trapezoid",
            PresetShape::Pentagon => "pentagon",
            PresetShape::Hexagon => "hexagon",
        }
    }

    /// Vertices in box coordinates, offset so the box's top-left sits at `origin`.
    pub fn points(&self, origin: Point) -> Vec<Point> {
        let s = PRESET_BOX;
        let base: Vec<Point> = match self {
            PresetShape::Triangle => vec![
                Point::new(0.5 * s, 0.0),
                Point::new(s, s),
                Point::new(0.0, s),
            ],
            PresetShape::Square => vec![
                Point::new(0.0, 0.0),
                Point::new(s, 0.0),
                Point::new(s, s),
                Point::new(0.0, s),
            ],
            PresetShape::Rectangle => vec![
                Point::new(0.0, 0.2 * s),
                Point::new(s, 0.2 * s),
                Point::new(s, 0.8 * s),
                Point::new(0.0, 0.8 * s),
            ],
            PresetShape::Trapezoid => vec![
                Point::new(0.25 * s, 0.0),
                Point::new(0.75 * s, 0.0),
                Point::new(s, s),
                Point::new(0.0, s),
            ],
            PresetShape::Pentagon => regular(5),
            PresetShape::Hexagon => regular(6),
        };
        base.into_iter().map(|p| p + origin).collect()
    }
}

// Inscribed in the preset box, first vertex at the top.
fn regular(sides: usize) -> Vec<Point> {
    let r = 0.5 * PRESET_BOX;
    (0..sides)
        .map(|i| {
            let angle = (i as f64) * 2.0 * PI / (sides as f64) - PI / 2.0;
            Point::new(r + r * angle.cos(), r + r * angle.sin())
        })
        .collect()
}
