//! Render-ready derivations from a snapshot. Everything here is a pure
//! function of snapshot data; the console decides how it ends up on screen.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use dronedeck_protocol::{CellLabel, Snapshot};
use regex::Regex;

/// Default bounded suffix of the service's unbounded log stream.
pub const LOG_TAIL: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub label: CellLabel,
    pub obstacle: bool,
    /// Id of a drone whose continuous position projects into this cell.
    pub drone: Option<i64>,
}

/// Row-major grid of `size * size` cells.
#[derive(Debug, Clone)]
pub struct GridView {
    pub size: u32,
    pub cells: Vec<CellView>,
}

impl GridView {
    pub fn cell(&self, row: u32, col: u32) -> &CellView {
        &self.cells[(row * self.size + col) as usize]
    }
}

/// The full grid is rebuilt on every render, so obstacle membership goes
/// through a set rather than scanning the obstacle list per cell.
pub fn grid_view(snapshot: &Snapshot) -> GridView {
    let obstacles: HashSet<(u32, u32)> = snapshot
        .obstacles
        .iter()
        .map(|o| (o.row, o.col))
        .collect();

    let mut occupied: HashMap<(u32, u32), i64> = HashMap::new();
    for drone in &snapshot.drones {
        if let Some(cell) = project_to_cell(drone.x, drone.y, snapshot) {
            occupied.insert(cell, drone.id);
        }
    }

    let size = snapshot.grid_size;
    let mut cells = Vec::with_capacity((size * size) as usize);
    for row in 0..size {
        for col in 0..size {
            cells.push(CellView {
                label: CellLabel::new(row, col),
                obstacle: obstacles.contains(&(row, col)),
                drone: occupied.get(&(row, col)).copied(),
            });
        }
    }
    GridView { size, cells }
}

/// Drones live at continuous pixel positions; a text grid needs the cell they
/// fall into. Positions outside the grid (or a degenerate cell size) project
/// nowhere.
fn project_to_cell(x: f64, y: f64, snapshot: &Snapshot) -> Option<(u32, u32)> {
    if snapshot.cell_size <= 0.0 {
        return None;
    }
    let col = (x / snapshot.cell_size).floor();
    let row = (y / snapshot.cell_size).floor();
    if row < 0.0 || col < 0.0 || row >= snapshot.grid_size as f64 || col >= snapshot.grid_size as f64
    {
        return None;
    }
    Some((row as u32, col as u32))
}

/// Last `limit` log lines, newest first, with markup-like substrings
/// stripped. The service's log text is echoed unsanitized; never let it carry
/// markup into the display.
pub fn log_tail(snapshot: &Snapshot, limit: usize) -> Vec<String> {
    snapshot
        .logs
        .iter()
        .rev()
        .take(limit)
        .map(|line| strip_markup(line))
        .collect()
}

pub fn strip_markup(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new("<[^>]*>").expect("static pattern"));
    tag.replace_all(text, "").into_owned()
}

/// Absent numeric fields render as an explicit unknown marker, never as zero.
pub fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "n/a".to_string(),
    }
}
