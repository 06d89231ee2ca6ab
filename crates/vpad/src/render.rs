//! Rendering collaborator interface
//!
//! The subsystem draws its overlay through this thin trait; the host
//! supplies an implementation backed by its graphics layer. All primitives
//! take pixel-space coordinates.

use glam::Vec2;

use crate::geometry::{Rect, ScreenSize};

/// RGB color for overlay drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Outline color for zones not currently hit
pub const COL_RELEASED: Color = Color::rgb(0xff, 0xcf, 0x33);
/// Outline color for zones a finger is on
pub const COL_PRESSED: Color = Color::rgb(0xff, 0x00, 0x00);

/// Pixel-space drawing primitives consumed by the overlay renderer
pub trait Surface {
    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color);

    /// Thick rectangle outline
    fn draw_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color);

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color);
}

/// Fill `rect` on `surface`
pub fn fill_rect(surface: &mut dyn Surface, rect: &Rect, screen: ScreenSize, color: Color) {
    let (x1, y1, x2, y2) = rect.to_pixels(screen);
    surface.fill_rect(x1, y1, x2, y2, color);
}

/// Thin outline drawn as four single-pixel lines
pub fn outline_rect(surface: &mut dyn Surface, rect: &Rect, screen: ScreenSize, color: Color) {
    let (x1, y1, x2, y2) = rect.to_pixels(screen);
    surface.draw_line(x1, y1, x2, y1, color);
    surface.draw_line(x1, y2, x2, y2, color);
    surface.draw_line(x1, y1, x1, y2, color);
    surface.draw_line(x2, y1, x2, y2, color);
}

/// Line between two normalized-space points
pub fn line(surface: &mut dyn Surface, a: Vec2, b: Vec2, screen: ScreenSize, color: Color) {
    surface.draw_line(
        (a.x * screen.width as f32) as i32,
        (a.y * screen.height as f32) as i32,
        (b.x * screen.width as f32) as i32,
        (b.y * screen.height as f32) as i32,
        color,
    );
}
