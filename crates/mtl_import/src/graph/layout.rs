//! Deterministic node placement
//!
//! Columns are logical pipeline stages supplied by the caller (texture
//! coordinates at 0, mapping at 1, textures at 2, and so on); rows within a
//! column are assigned first-fit. The allocator is a pure function over the
//! cells it has handed out, independent of any graph state.

/// Grid pitch in editor units
pub const NODE_SIZE: f32 = 300.0;

/// First-fit grid allocator for node locations
#[derive(Debug, Default)]
pub struct NodeLayout {
    occupied: Vec<(i32, i32)>,
}

impl NodeLayout {
    /// Create an empty layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the lowest unused row in `column` and return the editor
    /// coordinates of that cell
    ///
    /// Rows are scanned from 0 upward. Each call claims a new cell, so a
    /// node placed again later occupies an additional row.
    pub fn place(&mut self, column: i32) -> (f32, f32) {
        let mut row = 0;
        while self.occupied.contains(&(column, row)) {
            row += 1;
        }
        self.occupied.push((column, row));
        (
            column as f32 * NODE_SIZE,
            row as f32 * NODE_SIZE * 2.0 / 3.0,
        )
    }
}
