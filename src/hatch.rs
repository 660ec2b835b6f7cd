//! Hatch mapping.
//!
//! Each hatch is a drop-off patch of one surface color at the end of a road.
//! During calibration the robot drives each candidate road, reads the patch
//! color and records `color → heading` here. Later, an object of a given
//! color is delivered by looking up the heading of the matching hatch.
//!
//! The map always holds an entry for its fallback color, so a lookup for a
//! color that was never calibrated still yields a heading.

use std::collections::HashMap;

use crate::color::Color;

/// Headings of the drop-off hatches, keyed by patch color.
#[derive(Debug, Clone, PartialEq)]
pub struct HatchMap {
    headings: HashMap<Color, f64>,
    fallback: Color,
}

impl HatchMap {
    /// Creates a map whose uncalibrated lookups resolve to `heading`.
    pub fn new(fallback: Color, heading: f64) -> Self {
        let mut headings = HashMap::new();
        headings.insert(fallback, heading);
        Self { headings, fallback }
    }

    /// Records the heading of the hatch with the given color, replacing any
    /// previous entry for it.
    pub fn record(&mut self, color: Color, heading: f64) { self.headings.insert(color, heading); }

    /// Heading of the hatch for `color`, or the fallback's heading.
    pub fn lookup(&self, color: Color) -> f64 {
        match self.headings.get(&color) {
            Some(heading) => *heading,
            None => self.headings[&self.fallback],
        }
    }

    pub fn contains(&self, color: Color) -> bool { self.headings.contains_key(&color) }

    pub fn fallback(&self) -> Color { self.fallback }

    pub fn len(&self) -> usize { self.headings.len() }

    pub fn is_empty(&self) -> bool { self.headings.is_empty() }
}

impl Default for HatchMap {
    /// Uncalibrated colors go to the WHITE hatch, straight ahead.
    fn default() -> Self { Self::new(Color::White, 0.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncalibrated_color_uses_fallback() {
        let mut map = HatchMap::default();
        map.record(Color::Red, 90.0);
        assert_eq!(map.lookup(Color::Red), 90.0);
        assert_eq!(map.lookup(Color::Blue), 0.0);
        assert_eq!(map.lookup(Color::None), 0.0);
        assert!(!map.contains(Color::Blue));
    }

    #[test]
    fn recalibration_replaces_heading() {
        let mut map = HatchMap::default();
        map.record(Color::Green, -90.0);
        map.record(Color::Green, 90.0);
        assert_eq!(map.lookup(Color::Green), 90.0);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn fallback_can_be_recalibrated_but_not_lost() {
        let mut map = HatchMap::new(Color::Yellow, 45.0);
        map.record(Color::Yellow, -45.0);
        assert_eq!(map.lookup(Color::Green), -45.0);
        assert_eq!(map.fallback(), Color::Yellow);
        assert!(!map.is_empty());
    }
}
