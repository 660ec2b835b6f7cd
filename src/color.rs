//! Color readings and palettes.
//!
//! Every sensor query in the crate produces a [`Color`]. A reading that the
//! sensor could not lock onto is coerced to [`Color::None`] instead of being
//! reported as an error, so callers always hold a valid value.
//!
//! # Road colors
//!
//! The course is a network of roads joined by checkpoints. While the surface
//! sensor reads one of [`ROAD_COLORS`] the robot is still on a traversable
//! path. A BLACK crossing or a colored marker ends a drive.
//!
//! # Palettes
//!
//! A [`Palette`] restricts what a sensor may report. Raw HSV samples are
//! snapped to the nearest palette entry, which keeps the cylinder sensor from
//! ever reporting a surface-only color and vice versa.
//!
//! ```
//! use trailgrip::color::{Color, Hsv, Palette};
//!
//! let palette = Palette::cylinder();
//! assert_eq!(palette.classify(Hsv::new(3.0, 90.0, 80.0)), Some(Color::Red));
//! ```

use std::fmt;

use heapless::Vec;

/// Maximum number of entries a [`Palette`] can hold.
pub const PALETTE_CAPACITY: usize = 8;

/// Colors considered "still on a traversable path".
pub const ROAD_COLORS: [Color; 3] = [Color::Black, Color::White, Color::None];

/// A sensor reading snapped to the fixed color set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    /// No sensor lock.
    None,
}

impl Color {
    /// Coerces an optional reading into a color, mapping "no lock" to
    /// [`Color::None`].
    pub fn from_reading(reading: Option<Color>) -> Color { reading.unwrap_or(Color::None) }

    /// Returns `true` while the reading keeps the robot on a road.
    pub fn is_road(self) -> bool { ROAD_COLORS.contains(&self) }

    /// Returns `true` for readings that end a drive: the BLACK crossing or
    /// any colored marker off the road palette.
    pub fn is_checkpoint(self) -> bool { self == Color::Black || !self.is_road() }

    /// Returns `true` if the sensor locked onto something.
    pub fn is_detected(self) -> bool { self != Color::None }

    /// The reference HSV value the sensor compares samples against.
    pub fn reference_hsv(self) -> Hsv {
        match self {
            Color::Black => Hsv::new(0.0, 0.0, 10.0),
            Color::White => Hsv::new(0.0, 0.0, 100.0),
            Color::Red => Hsv::new(0.0, 100.0, 100.0),
            Color::Yellow => Hsv::new(60.0, 100.0, 100.0),
            Color::Green => Hsv::new(120.0, 100.0, 100.0),
            Color::Blue => Hsv::new(240.0, 100.0, 100.0),
            Color::None => Hsv::new(0.0, 0.0, 0.0),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Black => "BLACK",
            Color::White => "WHITE",
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
            Color::Yellow => "YELLOW",
            Color::None => "NONE",
        };
        f.write_str(name)
    }
}

/// A hue/saturation/value sample.
///
/// Hue is in degrees, saturation and value are percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self { Self { h, s, v } }

    /// Distance between two samples in the HSV cone.
    ///
    /// Hue is only meaningful when there is chroma, so samples are projected
    /// onto the cone before comparing. Dark or washed-out samples collapse
    /// toward the axis regardless of their hue.
    pub fn distance(&self, other: &Hsv) -> f64 {
        let (ax, ay, az) = self.cone();
        let (bx, by, bz) = other.cone();
        ((ax - bx).powi(2) + (ay - by).powi(2) + (az - bz).powi(2)).sqrt()
    }

    fn cone(&self) -> (f64, f64, f64) {
        let chroma = self.s * self.v / 100.0;
        let hue = self.h.to_radians();
        (chroma * hue.cos(), chroma * hue.sin(), self.v)
    }
}

/// The set of colors a sensor is allowed to report.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<(Color, Hsv), PALETTE_CAPACITY>,
}

impl Palette {
    /// Builds a palette from colors using their reference HSV values.
    ///
    /// Duplicates are ignored and anything past [`PALETTE_CAPACITY`] is
    /// dropped.
    pub fn new(colors: &[Color]) -> Self {
        let mut palette = Self { entries: Vec::new() };
        for color in colors {
            palette.set(*color, color.reference_hsv());
        }
        palette
    }

    /// Colors the ground-facing sensor can see on the course.
    pub fn surface() -> Self {
        Self::new(&[
            Color::Black,
            Color::White,
            Color::None,
            Color::Yellow,
            Color::Red,
            Color::Green,
            Color::Blue,
        ])
    }

    /// Colors an object in the gripper bay can have.
    pub fn cylinder() -> Self { Self::new(&[Color::Red, Color::Green, Color::Blue, Color::White]) }

    /// Adds or re-tunes a palette entry.
    ///
    /// Returns `false` if the palette is full.
    pub fn set(&mut self, color: Color, hsv: Hsv) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == color) {
            entry.1 = hsv;
            return true;
        }
        self.entries.push((color, hsv)).is_ok()
    }

    pub fn contains(&self, color: Color) -> bool { self.entries.iter().any(|(c, _)| *c == color) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Snaps a raw sample to the nearest palette entry.
    ///
    /// Returns `None` if the palette is empty or the nearest entry is
    /// [`Color::None`].
    pub fn classify(&self, sample: Hsv) -> Option<Color> {
        let mut best: Option<(Color, f64)> = None;
        for (color, reference) in self.entries.iter() {
            let d = sample.distance(reference);
            match best {
                Some((_, best_d)) if best_d <= d => {}
                _ => best = Some((*color, d)),
            }
        }
        best.map(|(c, _)| c).filter(|c| c.is_detected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn road_and_checkpoint_sets() {
        assert!(Color::Black.is_road());
        assert!(Color::White.is_road());
        assert!(Color::None.is_road());
        assert!(!Color::Red.is_road());

        assert!(Color::Black.is_checkpoint());
        assert!(Color::Yellow.is_checkpoint());
        assert!(!Color::White.is_checkpoint());
        assert!(!Color::None.is_checkpoint());
    }

    #[test]
    fn missing_reading_is_none() {
        assert_eq!(Color::from_reading(None), Color::None);
        assert_eq!(Color::from_reading(Some(Color::Blue)), Color::Blue);
    }

    #[test]
    fn cylinder_palette_never_reports_surface_colors() {
        let palette = Palette::cylinder();
        // A yellow object snaps to whichever cylinder color is closest.
        let got = palette.classify(Color::Yellow.reference_hsv());
        assert!(got.is_some());
        assert_ne!(got, Some(Color::Yellow));
        assert!(!palette.contains(Color::Black));
    }

    #[test]
    fn surface_palette_classifies_dark_as_black_and_void_as_none() {
        let palette = Palette::surface();
        assert_eq!(palette.classify(Hsv::new(200.0, 5.0, 12.0)), Some(Color::Black));
        assert_eq!(palette.classify(Hsv::new(0.0, 0.0, 0.0)), None);
        assert_eq!(palette.classify(Hsv::new(118.0, 85.0, 70.0)), Some(Color::Green));
        assert_eq!(palette.classify(Hsv::new(5.0, 3.0, 97.0)), Some(Color::White));
    }

    #[test]
    fn hue_wraps_around_red() {
        let palette = Palette::cylinder();
        assert_eq!(palette.classify(Hsv::new(355.0, 95.0, 90.0)), Some(Color::Red));
    }

    #[test]
    fn retuning_replaces_entry() {
        let mut palette = Palette::new(&[Color::Red, Color::Blue]);
        assert!(palette.set(Color::Red, Hsv::new(350.0, 60.0, 40.0)));
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.classify(Hsv::new(350.0, 60.0, 40.0)), Some(Color::Red));
    }

    #[test]
    fn empty_palette_has_no_lock() {
        let palette = Palette::new(&[]);
        assert!(palette.is_empty());
        assert_eq!(palette.classify(Hsv::new(0.0, 100.0, 100.0)), None);
    }
}
