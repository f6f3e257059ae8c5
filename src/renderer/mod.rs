//! Drawing
//!
//! The field draws through the [`Surface`] trait: a clear, filled discs and
//! stroked lines. The browser backs it with a 2D canvas context; tests and
//! the native demo record the calls instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod links;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use links::{Connection, connections};
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::FieldSettings;
use crate::sim::Particle;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

/// RGB plus a [0, 1] alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// CSS colour string, e.g. `rgba(255, 255, 255, 0.5)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Something the field can draw onto
pub trait Surface {
    /// Wipe the whole `width` x `height` area
    fn clear(&mut self, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Rgba);
}

/// Draw one frame: clear, every particle as a disc, then neighbour links
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    width: f32,
    height: f32,
    settings: &FieldSettings,
) {
    surface.clear(width, height);

    for particle in particles {
        surface.fill_circle(
            particle.pos,
            particle.size,
            settings.color.with_alpha(particle.opacity),
        );
    }

    for link in connections(particles, settings.link_distance) {
        let alpha = link.strength * settings.link_alpha;
        surface.stroke_line(
            link.from,
            link.to,
            settings.link_width,
            settings.color.with_alpha(alpha),
        );
    }
}
