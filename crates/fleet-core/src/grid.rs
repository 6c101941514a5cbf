//! Grid cell types and the continuous ↔ discrete coordinate mapper.
//!
//! # Snapping model
//!
//! Physical telemetry arrives as continuous mat coordinates.  Inverting the
//! affine cell transform gives a fractional cell position; the sample snaps
//! to the nearest integer cell only when the fractional remainder is within
//! `snap_tolerance` on **both** axes.  A sample that fails either axis is
//! "undetermined" — the agent is physically between cells and the scheduler
//! simply waits for a later sample.  This check is how the executor tells an
//! agent has *arrived* at a cell rather than merely passing through it.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A discrete grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── RealPoint ─────────────────────────────────────────────────────────────────

/// A continuous physical coordinate on the mat, in device units.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealPoint {
    pub x: f32,
    pub y: f32,
}

impl RealPoint {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for RealPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── GridGeometry ──────────────────────────────────────────────────────────────

/// The shared grid layout: cell counts, cell pitch, physical origin, and the
/// snap tolerance.  Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    /// Cell count along x.
    pub width: u32,
    /// Cell count along y.
    pub height: u32,
    /// Physical distance between adjacent cell centers.
    pub cell_size: f32,
    /// Physical coordinate of cell (0, 0)'s center.
    pub origin: RealPoint,
    /// Maximum per-axis fractional-cell deviation for a sample to snap.
    pub snap_tolerance: f32,
}

impl GridGeometry {
    /// Physical center of `cell`.  Total — valid for out-of-grid cells too.
    #[inline]
    pub fn cell_to_real(&self, cell: Cell) -> RealPoint {
        RealPoint {
            x: self.cell_size * cell.x as f32 + self.origin.x,
            y: self.cell_size * cell.y as f32 + self.origin.y,
        }
    }

    /// Snap a physical sample to the nearest grid cell.
    ///
    /// Returns `None` when the sample is farther than `snap_tolerance`
    /// (in cell units) from the nearest cell center on either axis — the
    /// agent is still moving between cells.
    ///
    /// The tolerance is applied identically to both axes.
    pub fn real_to_cell(&self, point: RealPoint) -> Option<Cell> {
        let fx = (point.x - self.origin.x) / self.cell_size;
        let fy = (point.y - self.origin.y) / self.cell_size;
        let rx = fx.round();
        let ry = fy.round();
        if (fx - rx).abs() < self.snap_tolerance && (fy - ry).abs() < self.snap_tolerance {
            Some(Cell::new(rx as i32, ry as i32))
        } else {
            None
        }
    }

    /// `true` if `cell` lies inside the grid bounds.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
