// src/sampler.rs

//! Grid sampler: drives an [`Evaluator`] over the grid and streams packed
//! rows to a [`PbmWriter`].
//!
//! ```text
//!   columns ──seed──▶ x(block)  (once per column block, cached for the run)
//!   rows    ──seed──▶ y(block)  (once per row block)
//!                       │
//!                 broadcast lane ──▶ xy(x block, y lane) per column block
//!                                        │
//!                                   PackedRow ──▶ PbmWriter
//! ```
//!
//! Everything runs in blocks of the evaluator's stride. The grid is padded
//! up to a whole number of blocks on both axes; padded lanes are evaluated
//! like any other but never reach the packed row or the stream.

use std::io::Write;
use std::time::Instant;

use log::{debug, info, trace};

use crate::bits::PackedRow;
use crate::buffer::FeatureBuffer;
use crate::error::Result;
use crate::evaluator::{Evaluator, Widths};
use crate::grid::{next_stride, Grid};
use crate::pbm::PbmWriter;

/// Counters describing one finished render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub size: usize,
    pub stride: usize,
    pub rows: usize,
    pub x_calls: usize,
    pub y_calls: usize,
    pub xy_calls: usize,
}

/// Owns every buffer needed for one render of one evaluator.
pub struct Sampler<'e, E: Evaluator + ?Sized> {
    evaluator: &'e E,
    grid: Grid,
    widths: Widths,
    /// Row-basis vectors for every padded column, one block per column block.
    x_basis: FeatureBuffer,
    /// Column-basis vectors for the current block of rows.
    y_block: FeatureBuffer,
    /// One lane of `y_block` repeated across every lane.
    y_lane: FeatureBuffer,
    results: FeatureBuffer,
    row: PackedRow,
}

impl<'e, E: Evaluator + ?Sized> Sampler<'e, E> {
    /// Validates the size and the evaluator, then allocates all buffers.
    ///
    /// Nothing is evaluated or written yet.
    pub fn new(evaluator: &'e E, size: u32) -> Result<Self> {
        let grid = Grid::new(size)?;
        let widths = Widths::of(evaluator)?;
        let stride = widths.stride;

        let x_basis = FeatureBuffer::for_lanes(widths.x, grid.size(), stride)?;
        let y_block = FeatureBuffer::block(widths.y, stride)?;
        let y_lane = FeatureBuffer::block(widths.y, stride)?;
        let results = FeatureBuffer::block(1, stride)?;

        debug!(
            "Sampler: size={} stride={} x_size={} y_size={} padded={}",
            grid.size(),
            stride,
            widths.x,
            widths.y,
            next_stride(grid.size(), stride)
        );

        // Packed rows hold only the real columns; padded lanes fall off the end.
        let row = PackedRow::new(x_basis.logical_lanes());

        Ok(Self {
            evaluator,
            grid,
            widths,
            x_basis,
            y_block,
            y_lane,
            results,
            row,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn widths(&self) -> Widths {
        self.widths
    }

    /// Renders the full image into `sink`.
    pub fn render<W: Write>(mut self, sink: W) -> Result<RenderSummary> {
        let started = Instant::now();
        let size = self.grid.size();
        let stride = self.widths.stride;
        let mut summary = RenderSummary {
            size,
            stride,
            ..RenderSummary::default()
        };

        summary.x_calls = self.build_x_basis();

        let mut writer = PbmWriter::new(sink, self.row.width(), size)?;
        let col_blocks = self.x_basis.block_count();

        for row_block in 0..size.div_ceil(stride) {
            let first_row = row_block * stride;
            self.build_y_block(first_row);
            summary.y_calls += 1;

            let lanes = (size - first_row).min(stride);
            debug!(
                "Sampler: row block {} (rows {}..{})",
                row_block,
                first_row,
                first_row + lanes
            );

            for lane in 0..lanes {
                self.broadcast_lane(lane);
                self.row.clear();
                for col_block in 0..col_blocks {
                    self.evaluator.xy(
                        self.x_basis.block_at(col_block),
                        &self.y_lane,
                        &mut self.results,
                    );
                    self.row.record_batch(col_block * stride, &self.results);
                }
                summary.xy_calls += col_blocks;

                writer.write_row(self.row.as_bytes())?;
                summary.rows += 1;
                trace!("Sampler: emitted row {}", first_row + lane);
            }
        }

        writer.finish()?;
        info!(
            "Rendered {}x{} (stride {}) in {:?}",
            size,
            size,
            stride,
            started.elapsed()
        );
        Ok(summary)
    }

    /// Seeds and evaluates the row-basis vector of every padded column.
    /// Returns the number of `x` calls made.
    fn build_x_basis(&mut self) -> usize {
        let stride = self.widths.stride;
        let blocks = self.x_basis.block_count();
        for block in 0..blocks {
            let first_col = block * stride;
            let span = self.x_basis.block_at_mut(block);
            for (lane, seed) in span[..stride].iter_mut().enumerate() {
                *seed = self.grid.column(first_col + lane);
            }
            self.evaluator.x(span);
        }
        blocks
    }

    /// Seeds and evaluates the column-basis vectors of `stride` rows
    /// starting at `first_row`.
    fn build_y_block(&mut self, first_row: usize) {
        let stride = self.widths.stride;
        self.y_block.fill(0.0);
        for (lane, seed) in self.y_block[..stride].iter_mut().enumerate() {
            *seed = self.grid.row(first_row + lane);
        }
        self.evaluator.y(None, &mut self.y_block);
    }

    /// Copies lane `lane` of every component of `y_block` across all lanes
    /// of `y_lane`.
    fn broadcast_lane(&mut self, lane: usize) {
        let stride = self.widths.stride;
        for (src, dst) in self
            .y_block
            .chunks_exact(stride)
            .zip(self.y_lane.chunks_exact_mut(stride))
        {
            dst.fill(src[lane]);
        }
    }
}

/// Renders `evaluator` on a `size`×`size` grid as a P4 bitmap into `sink`.
pub fn render<E, W>(evaluator: &E, size: u32, sink: W) -> Result<RenderSummary>
where
    E: Evaluator + ?Sized,
    W: Write,
{
    Sampler::new(evaluator, size)?.render(sink)
}
