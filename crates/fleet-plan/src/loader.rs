//! JSON input-document loaders.
//!
//! Two documents are loaded once at startup, before any scheduling:
//!
//! # Plan document
//!
//! Maps device id → ordered cell list.  Index 0 is the start cell.
//!
//! ```json
//! {
//!   "h7p": [{"x": 0, "y": 0}, {"x": 1, "y": 0}],
//!   "k2c": [{"x": 2, "y": 0}, {"x": 1, "y": 0}, {"x": 1, "y": 1}]
//! }
//! ```
//!
//! Entries for devices absent from the roster are ignored (a plan file may
//! cover a larger fleet than is currently connected).  A connected device
//! with no entry is fatal — the run does not proceed with a partial fleet.
//!
//! # Geometry document
//!
//! Upper-case keys are the original wire names and are kept verbatim:
//!
//! ```json
//! {"WIDTH": 3, "HEIGHT": 3, "CELL_SIZE": 50.0,
//!  "INIT_COORD_X": 100.0, "INIT_COORD_Y": 100.0, "POS_BUF": 0.2}
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fleet_core::{Cell, GridGeometry, RealPoint, Roster};

use crate::plan::{PathPlan, PlanSet};
use crate::PlanError;

// ── Document records ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CellRecord {
    x: i32,
    y: i32,
}

#[derive(Deserialize)]
struct GeometryDoc {
    #[serde(rename = "WIDTH")]
    width: u32,
    #[serde(rename = "HEIGHT")]
    height: u32,
    #[serde(rename = "CELL_SIZE")]
    cell_size: f32,
    #[serde(rename = "INIT_COORD_X")]
    init_coord_x: f32,
    #[serde(rename = "INIT_COORD_Y")]
    init_coord_y: f32,
    #[serde(rename = "POS_BUF")]
    pos_buf: f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the per-agent plan document from a JSON file.
///
/// Returns a `PlanSet` indexed by `AgentId` in roster order.
pub fn load_plan_json(path: &Path, roster: &Roster) -> Result<PlanSet, PlanError> {
    let file = std::fs::File::open(path).map_err(PlanError::Io)?;
    load_plan_reader(file, roster)
}

/// Like [`load_plan_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded documents.
pub fn load_plan_reader<R: Read>(reader: R, roster: &Roster) -> Result<PlanSet, PlanError> {
    let mut by_device: HashMap<String, Vec<CellRecord>> =
        serde_json::from_reader(reader).map_err(|e| PlanError::Parse(e.to_string()))?;

    let mut plans: Vec<PathPlan> = Vec::with_capacity(roster.len());
    for (_, device) in roster.iter() {
        let records = by_device
            .remove(device)
            .ok_or_else(|| PlanError::MissingAgent(device.to_owned()))?;
        if records.is_empty() {
            return Err(PlanError::EmptyPath(device.to_owned()));
        }
        let cells = records.into_iter().map(|r| Cell::new(r.x, r.y)).collect();
        plans.push(PathPlan::new(cells));
    }

    Ok(PlanSet::new(plans))
}

/// Load the grid geometry document from a JSON file.
pub fn load_geometry_json(path: &Path) -> Result<GridGeometry, PlanError> {
    let file = std::fs::File::open(path).map_err(PlanError::Io)?;
    load_geometry_reader(file)
}

/// Like [`load_geometry_json`] but accepts any `Read` source.
pub fn load_geometry_reader<R: Read>(reader: R) -> Result<GridGeometry, PlanError> {
    let doc: GeometryDoc =
        serde_json::from_reader(reader).map_err(|e| PlanError::Geometry(e.to_string()))?;

    if doc.width == 0 || doc.height == 0 {
        return Err(PlanError::Geometry(format!(
            "grid must have positive dimensions, got {}×{}",
            doc.width, doc.height
        )));
    }
    if doc.cell_size <= 0.0 {
        return Err(PlanError::Geometry(format!(
            "CELL_SIZE must be positive, got {}",
            doc.cell_size
        )));
    }
    if doc.pos_buf <= 0.0 {
        return Err(PlanError::Geometry(format!(
            "POS_BUF must be positive, got {}",
            doc.pos_buf
        )));
    }

    Ok(GridGeometry {
        width:          doc.width,
        height:         doc.height,
        cell_size:      doc.cell_size,
        origin:         RealPoint::new(doc.init_coord_x, doc.init_coord_y),
        snap_tolerance: doc.pos_buf,
    })
}
