//! Sigils: concrete strokes drawn on the hex grid
//!
//! A sigil pairs a starting direction with an angle signature. The signature
//! alone identifies the drawing up to rotation; the starting direction pins
//! the absolute orientation it was drawn with.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::hex::{Coord, Direction, Turn};
use crate::signature::Signature;

/// A stroke drawn on the hex grid
///
/// Two sigils are the same drawing iff both the starting direction and the
/// full turn sequence match. Geometric congruence under rotation does not
/// make two sigils equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sigil {
    /// Absolute heading the stroke was started with
    #[serde(rename = "start_dir")]
    pub start: Direction,
    /// Orientation-relative turn sequence
    #[serde(rename = "angles")]
    pub turns: Signature,
}

impl Sigil {
    /// Build a sigil from its stored representation. Always succeeds; no
    /// geometric validation is applied.
    pub fn new(start: Direction, turns: Signature) -> Self {
        Self { start, turns }
    }

    /// A single-point sigil facing `start`
    pub fn point(start: Direction) -> Self {
        Self::new(start, Signature::empty())
    }

    /// Reconstruct the absolute cell sequence this sigil visits
    ///
    /// Starts at the origin; for each turn the heading rotates and the
    /// cursor steps one cell, yielding one coordinate per turn plus the
    /// origin. The empty signature visits only the origin.
    pub fn points(&self) -> Vec<Coord> {
        let mut out = Vec::with_capacity(self.turns.len() + 1);
        let mut cursor = Coord::ORIGIN;
        let mut heading = self.start;
        out.push(cursor);
        for &turn in self.turns.turns() {
            heading *= turn;
            cursor += heading;
            out.push(cursor);
        }
        out
    }

    /// Heading of the stroke after its last segment
    pub fn final_direction(&self) -> Direction {
        self.turns
            .turns()
            .iter()
            .fold(self.start, |heading, &turn| heading * turn)
    }

    /// Try to extend the stroke one cell in the given absolute direction
    ///
    /// Refuses a hard reversal of the current heading, and refuses to
    /// retrace any segment the stroke has already drawn in either direction.
    /// Returns whether the segment was appended.
    pub fn try_extend(&mut self, next: Direction) -> bool {
        let mut seen: HashSet<(Coord, Direction)> = HashSet::new();
        let mut cursor = Coord::ORIGIN;
        let mut heading = self.start;
        for &turn in self.turns.turns() {
            heading *= turn;
            seen.insert((cursor, heading));
            // A segment drawn here-to-there also blocks there-to-here
            seen.insert((cursor + heading, heading.opposite()));
            cursor += heading;
        }

        if seen.contains(&(cursor, next)) {
            return false;
        }
        let turn = Turn::between(heading, next);
        if turn == Turn::Back {
            return false;
        }

        self.turns.push(turn);
        true
    }
}

impl fmt::Display for Sigil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sigil[{:?}, {}]", self.start, self.turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(text: &str) -> Signature {
        Signature::parse(text).unwrap()
    }

    #[test]
    fn point_sigil_visits_only_the_origin() {
        let sigil = Sigil::point(Direction::East);
        assert_eq!(sigil.points(), vec![Coord::ORIGIN]);
    }

    #[test]
    fn points_yields_one_cell_per_turn() {
        let sigil = Sigil::new(Direction::East, sig("www"));
        assert_eq!(
            sigil.points(),
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(3, 0),
            ]
        );
    }

    #[test]
    fn turns_rotate_before_stepping() {
        // First turn applies before the first step, so the first segment
        // heads east rotated hard-left (north-west)
        let sigil = Sigil::new(Direction::East, sig("a"));
        let expected = Coord::ORIGIN + Direction::East.rotated(Turn::HardLeft);
        assert_eq!(sigil.points(), vec![Coord::ORIGIN, expected]);
    }

    #[test]
    fn final_direction_folds_all_turns() {
        let sigil = Sigil::new(Direction::NorthEast, sig("aqaq"));
        let mut heading = Direction::NorthEast;
        for &turn in sigil.turns.turns() {
            heading = heading * turn;
        }
        assert_eq!(sigil.final_direction(), heading);
        assert_eq!(Sigil::point(Direction::West).final_direction(), Direction::West);
    }

    #[test]
    fn try_extend_appends_the_connecting_turn() {
        let mut sigil = Sigil::point(Direction::East);
        assert!(sigil.try_extend(Direction::East));
        assert!(sigil.try_extend(Direction::NorthEast));
        assert_eq!(sigil.turns, sig("wq"));

        let points = sigil.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Coord::ORIGIN + Direction::East);
        assert_eq!(points[2], points[1] + Direction::NorthEast);
    }

    #[test]
    fn try_extend_refuses_hard_reversal() {
        let mut sigil = Sigil::point(Direction::East);
        assert!(sigil.try_extend(Direction::East));
        assert!(!sigil.try_extend(Direction::West));
        assert_eq!(sigil.turns, sig("w"));
    }

    #[test]
    fn try_extend_refuses_retracing_a_segment() {
        // Walk a tight triangle back to the origin
        let mut sigil = Sigil::point(Direction::East);
        assert!(sigil.try_extend(Direction::East));
        assert!(sigil.try_extend(Direction::NorthWest));
        assert!(sigil.try_extend(Direction::SouthWest));
        // Closing the triangle would redraw the first segment backwards
        assert!(!sigil.try_extend(Direction::East));
    }

    #[test]
    fn boundary_form_is_a_tagged_record() {
        let sigil = Sigil::new(Direction::NorthEast, sig("aqaq"));
        let json = serde_json::to_string(&sigil).unwrap();
        assert_eq!(json, r#"{"start_dir":"north_east","angles":"aqaq"}"#);
        let back: Sigil = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sigil);
    }

    #[test]
    fn display_names_orientation_and_signature() {
        let sigil = Sigil::new(Direction::NorthEast, sig("aqaq"));
        assert_eq!(sigil.to_string(), "Sigil[NorthEast, aqaq]");
    }
}
