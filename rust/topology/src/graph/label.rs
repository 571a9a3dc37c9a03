// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topological labels.
//!
//! A [`Label`] records, for each of the (up to) two argument geometries of an
//! operation, where a graph component lies relative to that geometry: on the
//! component itself, and for area edges also on its left and right sides.

use serde::{Deserialize, Serialize};

/// Location of a point relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
    /// Not yet known.
    Null,
}

impl Location {
    /// Row/column index in an intersection matrix.
    pub fn index(self) -> Option<usize> {
        match self {
            Location::Interior => Some(0),
            Location::Boundary => Some(1),
            Location::Exterior => Some(2),
            Location::Null => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
            Location::Null => '-',
        }
    }
}

/// Position relative to a directed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    On = 0,
    Left = 1,
    Right = 2,
}

impl Position {
    /// Left and Right swap; On stays On.
    pub fn opposite(self) -> Position {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
            Position::On => Position::On,
        }
    }
}

/// Locations of a component relative to one geometry.
///
/// Line locations only carry the On position; area locations carry On,
/// Left and Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyLocation {
    locations: [Location; 3],
    area: bool,
}

impl TopologyLocation {
    pub fn line(on: Location) -> Self {
        Self {
            locations: [on, Location::Null, Location::Null],
            area: false,
        }
    }

    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self {
            locations: [on, left, right],
            area: true,
        }
    }

    pub fn is_area(&self) -> bool {
        self.area
    }

    pub fn is_line(&self) -> bool {
        !self.area
    }

    fn len(&self) -> usize {
        if self.area {
            3
        } else {
            1
        }
    }

    pub fn get(&self, pos: Position) -> Location {
        let i = pos as usize;
        if i < self.len() {
            self.locations[i]
        } else {
            Location::Null
        }
    }

    pub fn set(&mut self, pos: Position, loc: Location) {
        if pos != Position::On && !self.area {
            self.area = true;
        }
        self.locations[pos as usize] = loc;
    }

    /// All positions are Null.
    pub fn is_null(&self) -> bool {
        self.locations[..self.len()].iter().all(|l| *l == Location::Null)
    }

    /// Some position is Null.
    pub fn is_any_null(&self) -> bool {
        self.locations[..self.len()].iter().any(|l| *l == Location::Null)
    }

    pub fn is_equal_on_side(&self, other: &TopologyLocation, pos: Position) -> bool {
        self.get(pos) == other.get(pos)
    }

    pub fn all_positions_equal(&self, loc: Location) -> bool {
        self.locations[..self.len()].iter().all(|l| *l == loc)
    }

    pub fn flip(&mut self) {
        if self.area {
            self.locations.swap(1, 2);
        }
    }

    pub fn set_all(&mut self, loc: Location) {
        let n = self.len();
        self.locations[..n].fill(loc);
    }

    pub fn set_all_if_null(&mut self, loc: Location) {
        let n = self.len();
        for l in &mut self.locations[..n] {
            if *l == Location::Null {
                *l = loc;
            }
        }
    }

    /// Fills Null positions from `other`, widening to an area location if
    /// `other` is one.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if other.area && !self.area {
            self.area = true;
            self.locations[1] = Location::Null;
            self.locations[2] = Location::Null;
        }
        for i in 0..self.len() {
            if self.locations[i] == Location::Null && i < other.len() {
                self.locations[i] = other.locations[i];
            }
        }
    }

    pub fn to_line(&self) -> TopologyLocation {
        TopologyLocation::line(self.locations[0])
    }
}

impl std::fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.area {
            write!(
                f,
                "{}{}{}",
                self.locations[1].symbol(),
                self.locations[0].symbol(),
                self.locations[2].symbol()
            )
        } else {
            write!(f, "{}", self.locations[0].symbol())
        }
    }
}

/// Labels of a graph component relative to both argument geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Default for Label {
    fn default() -> Self {
        Self::line(Location::Null)
    }
}

impl Label {
    /// Line label with the same On location for both geometries.
    pub fn line(on: Location) -> Self {
        Self {
            elt: [TopologyLocation::line(on), TopologyLocation::line(on)],
        }
    }

    /// Line label with `on` for geometry `geom_index` and Null for the other.
    pub fn line_for(geom_index: usize, on: Location) -> Self {
        let mut label = Self::line(Location::Null);
        label.elt[geom_index] = TopologyLocation::line(on);
        label
    }

    /// Area label with the same locations for both geometries.
    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self {
            elt: [
                TopologyLocation::area(on, left, right),
                TopologyLocation::area(on, left, right),
            ],
        }
    }

    /// Area label for geometry `geom_index`; the other geometry is all Null.
    pub fn area_for(geom_index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Self::area(Location::Null, Location::Null, Location::Null);
        label.elt[geom_index] = TopologyLocation::area(on, left, right);
        label
    }

    /// Line label keeping only the On locations of `label`.
    pub fn to_line_label(label: &Label) -> Self {
        Self {
            elt: [label.elt[0].to_line(), label.elt[1].to_line()],
        }
    }

    pub fn flip(&mut self) {
        self.elt[0].flip();
        self.elt[1].flip();
    }

    pub fn flipped(&self) -> Label {
        let mut label = *self;
        label.flip();
        label
    }

    pub fn location(&self, geom_index: usize) -> Location {
        self.elt[geom_index].get(Position::On)
    }

    pub fn location_at(&self, geom_index: usize, pos: Position) -> Location {
        self.elt[geom_index].get(pos)
    }

    pub fn set_location(&mut self, geom_index: usize, loc: Location) {
        self.elt[geom_index].set(Position::On, loc);
    }

    pub fn set_location_at(&mut self, geom_index: usize, pos: Position, loc: Location) {
        self.elt[geom_index].set(pos, loc);
    }

    pub fn set_all_locations(&mut self, geom_index: usize, loc: Location) {
        self.elt[geom_index].set_all(loc);
    }

    pub fn set_all_locations_if_null(&mut self, geom_index: usize, loc: Location) {
        self.elt[geom_index].set_all_if_null(loc);
    }

    pub fn merge(&mut self, other: &Label) {
        self.elt[0].merge(&other.elt[0]);
        self.elt[1].merge(&other.elt[1]);
    }

    /// Number of geometries this label says anything about.
    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|e| !e.is_null()).count()
    }

    pub fn is_null(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_null()
    }

    pub fn is_any_null(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_any_null()
    }

    /// Either geometry carries area locations.
    pub fn is_area(&self) -> bool {
        self.elt[0].is_area() || self.elt[1].is_area()
    }

    pub fn is_area_for(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_area()
    }

    pub fn is_line(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_line()
    }

    pub fn is_equal_on_side(&self, other: &Label, pos: Position) -> bool {
        self.elt[0].is_equal_on_side(&other.elt[0], pos) && self.elt[1].is_equal_on_side(&other.elt[1], pos)
    }

    pub fn all_positions_equal(&self, geom_index: usize, loc: Location) -> bool {
        self.elt[geom_index].all_positions_equal(loc)
    }

    pub fn topology_location(&self, geom_index: usize) -> &TopologyLocation {
        &self.elt[geom_index]
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A:{} B:{}", self.elt[0], self.elt[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_swaps_sides_of_area_labels_only() {
        let mut label = Label::area_for(0, Location::Boundary, Location::Interior, Location::Exterior);
        label.flip();
        assert_eq!(label.location_at(0, Position::Left), Location::Exterior);
        assert_eq!(label.location_at(0, Position::Right), Location::Interior);

        let mut line = Label::line_for(1, Location::Interior);
        line.flip();
        assert_eq!(line.location(1), Location::Interior);
    }

    #[test]
    fn merge_fills_nulls_and_widens() {
        let mut a = Label::line_for(0, Location::Interior);
        let b = Label::area_for(1, Location::Boundary, Location::Exterior, Location::Interior);
        a.merge(&b);
        assert_eq!(a.location(0), Location::Interior);
        assert_eq!(a.location(1), Location::Boundary);
        assert!(a.is_area_for(1));
        assert_eq!(a.location_at(1, Position::Right), Location::Interior);
        assert_eq!(a.geometry_count(), 2);
    }

    #[test]
    fn null_checks() {
        let label = Label::area_for(0, Location::Boundary, Location::Null, Location::Exterior);
        assert!(!label.is_null(0));
        assert!(label.is_any_null(0));
        assert!(label.is_null(1));
        assert_eq!(label.geometry_count(), 1);
    }

    #[test]
    fn set_all_if_null_preserves_known() {
        let mut label = Label::area_for(0, Location::Boundary, Location::Null, Location::Exterior);
        label.set_all_locations_if_null(0, Location::Interior);
        assert_eq!(label.location_at(0, Position::Left), Location::Interior);
        assert_eq!(label.location_at(0, Position::Right), Location::Exterior);
    }

    #[test]
    fn to_line_label_keeps_on_only() {
        let area = Label::area(Location::Boundary, Location::Interior, Location::Exterior);
        let line = Label::to_line_label(&area);
        assert!(!line.is_area());
        assert_eq!(line.location(0), Location::Boundary);
        assert_eq!(line.location_at(0, Position::Left), Location::Null);
    }

    #[test]
    fn display() {
        let label = Label::area_for(0, Location::Boundary, Location::Interior, Location::Exterior);
        assert_eq!(label.to_string(), "A:ibe B:---");
    }
}
