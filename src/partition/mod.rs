//! Partitioning of the result grid into independent work units.
//!
//! Every strategy produces units whose regions are pairwise disjoint and
//! together cover the whole `rows × cols` grid. That property is what lets
//! workers write into one shared result buffer without locks: before
//! dispatch the buffer is split into one [`Tile`] per unit, and each tile
//! only holds `&mut` access to its own cells.

use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::matrix::Shape;

/// How the result grid is divided and scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One unit covering everything, computed on the calling thread.
    Whole,
    /// One unit per output row on a fixed worker pool.
    RowWise,
    /// Square tiles of the given edge length on a fixed worker pool.
    BlockWise(usize),
    /// One unit per output row on a work-stealing pool.
    DataParallel,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Whole => "sequential",
            Strategy::RowWise => "row-wise",
            Strategy::BlockWise(_) => "block-wise",
            Strategy::DataParallel => "data-parallel",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BlockWise(size) => write!(f, "block-wise({})", size),
            other => f.write_str(other.name()),
        }
    }
}

/// Half-open rectangle `[row_start, row_end) × [col_start, col_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Region {
    pub fn rows(&self) -> Range<usize> {
        self.row_start..self.row_end
    }

    pub fn cols(&self) -> Range<usize> {
        self.col_start..self.col_end
    }

    pub fn height(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn width(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows().contains(&row) && self.cols().contains(&col)
    }
}

/// A piece of the output to be computed by one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkUnit {
    Whole,
    Row(usize),
    Block(Region),
}

impl WorkUnit {
    /// The cells this unit writes, for a result of the given shape.
    pub fn region(&self, shape: Shape) -> Region {
        match *self {
            WorkUnit::Whole => Region {
                row_start: 0,
                row_end: shape.rows,
                col_start: 0,
                col_end: shape.cols,
            },
            WorkUnit::Row(i) => Region {
                row_start: i,
                row_end: i + 1,
                col_start: 0,
                col_end: shape.cols,
            },
            WorkUnit::Block(region) => region,
        }
    }
}

/// Units to dispatch and the number of workers to run them on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub units: Vec<WorkUnit>,
    pub workers: usize,
}

/// Splits a `shape` result grid according to `strategy`.
///
/// Fails with [`Error::InvalidParameter`] for a zero block size.
pub fn partition(shape: Shape, strategy: Strategy) -> Result<Vec<WorkUnit>> {
    let units = match strategy {
        Strategy::Whole => vec![WorkUnit::Whole],
        Strategy::RowWise | Strategy::DataParallel => (0..shape.rows).map(WorkUnit::Row).collect(),
        Strategy::BlockWise(block_size) => {
            if block_size == 0 {
                return Err(Error::InvalidParameter {
                    name: "block size",
                    value: block_size,
                });
            }
            blocks(shape, block_size)
        }
    };
    Ok(units)
}

/// Partitions and sizes the pool: never more workers than units.
pub fn plan(shape: Shape, strategy: Strategy, budget: usize) -> Result<Plan> {
    if budget == 0 {
        return Err(Error::InvalidParameter {
            name: "worker count",
            value: budget,
        });
    }
    let units = partition(shape, strategy)?;
    let workers = budget.min(units.len()).max(1);
    Ok(Plan { units, workers })
}

fn blocks(shape: Shape, block_size: usize) -> Vec<WorkUnit> {
    let tiles = shape.rows.div_ceil(block_size) * shape.cols.div_ceil(block_size);
    let mut units = Vec::with_capacity(tiles);

    for row_start in (0..shape.rows).step_by(block_size) {
        let row_end = (row_start + block_size).min(shape.rows);
        for col_start in (0..shape.cols).step_by(block_size) {
            let col_end = (col_start + block_size).min(shape.cols);
            units.push(WorkUnit::Block(Region {
                row_start,
                row_end,
                col_start,
                col_end,
            }));
        }
    }
    units
}

/// The region of one unit together with exclusive access to its cells.
///
/// `segments[r]` is output row `region.row_start + r`, restricted to
/// `region.cols()`.
#[derive(Debug)]
pub struct Tile<'a> {
    pub region: Region,
    pub segments: Vec<&'a mut [i32]>,
}

/// Splits a row-major result buffer into one tile per unit.
///
/// The units must be pairwise disjoint, as every [`partition`] output is.
pub fn split_tiles<'a>(data: &'a mut [i32], shape: Shape, units: &[WorkUnit]) -> Vec<Tile<'a>> {
    let mut tiles: Vec<Tile<'a>> = units
        .iter()
        .map(|unit| {
            let region = unit.region(shape);
            Tile {
                region,
                segments: Vec::with_capacity(region.height()),
            }
        })
        .collect();

    // (col_start, tile index) for every tile touching each row
    let mut by_row: Vec<Vec<(usize, usize)>> = vec![Vec::new(); shape.rows];
    for (idx, tile) in tiles.iter().enumerate() {
        for r in tile.region.rows() {
            by_row[r].push((tile.region.col_start, idx));
        }
    }

    for (row, entries) in data.chunks_mut(shape.cols).zip(by_row.iter_mut()) {
        entries.sort_unstable();

        let mut rest: &'a mut [i32] = row;
        let mut offset = 0;
        for &(col_start, idx) in entries.iter() {
            let width = tiles[idx].region.width();
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(col_start - offset);
            let (segment, tail) = tail.split_at_mut(width);
            tiles[idx].segments.push(segment);
            rest = tail;
            offset = col_start + width;
        }
    }

    tiles
}
