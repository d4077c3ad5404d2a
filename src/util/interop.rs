//! Conversions to and from `egui` types, so that positions and screen rectangles computed here
//! can be drawn directly by an immediate-mode overlay.
use crate::util::linalg::{Rect, Size, Vec2};

impl From<egui::Vec2> for Vec2 {
    fn from(value: egui::Vec2) -> Self {
        Vec2 {
            x: value.x,
            y: value.y,
        }
    }
}
impl From<Vec2> for egui::Vec2 {
    fn from(value: Vec2) -> Self {
        egui::vec2(value.x, value.y)
    }
}

impl From<egui::Pos2> for Vec2 {
    fn from(value: egui::Pos2) -> Self {
        Vec2 {
            x: value.x,
            y: value.y,
        }
    }
}
impl From<Vec2> for egui::Pos2 {
    fn from(value: Vec2) -> Self {
        egui::pos2(value.x, value.y)
    }
}

impl From<Size> for egui::Vec2 {
    fn from(value: Size) -> Self {
        egui::vec2(value.width, value.height)
    }
}

/// The top-left corner becomes `min`.
impl From<Rect> for egui::Rect {
    fn from(value: Rect) -> Self {
        egui::Rect::from_min_size(value.pos().into(), value.size().into())
    }
}
impl From<egui::Rect> for Rect {
    fn from(value: egui::Rect) -> Self {
        Rect {
            x: value.min.x,
            y: value.min.y,
            width: value.width(),
            height: value.height(),
        }
    }
}
