// src/buffer.rs

//! Aligned feature-vector storage.
//!
//! Each render allocates a handful of these once, up front, with the
//! alignment the evaluator's batch width requires (`stride * 4` bytes).
//! A buffer is a single zeroed allocation of whole blocks; it never grows.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::slice;

use crate::error::{RenderError, Result};

/// A fixed-length, zero-initialised, aligned run of `f32` blocks.
///
/// The buffer holds `blocks` blocks of `block_len` floats. `logical` records
/// how many lanes carry real grid coordinates; the rest is padding up to the
/// next whole block.
#[derive(Debug)]
pub struct FeatureBuffer {
    ptr: NonNull<f32>,
    len: usize,
    align: usize,
    block_len: usize,
    logical: usize,
}

impl FeatureBuffer {
    /// Allocates room for `lanes` vectors of `width` floats in blocks of
    /// `stride` lanes, rounding `lanes` up to a whole number of blocks.
    pub fn for_lanes(width: usize, lanes: usize, stride: usize) -> Result<Self> {
        let overflow = || RenderError::SizeOverflow { width, lanes };
        let blocks = lanes.div_ceil(stride);
        let block_len = width.checked_mul(stride).ok_or_else(overflow)?;
        let len = block_len.checked_mul(blocks).ok_or_else(overflow)?;
        let align = stride * mem::size_of::<f32>();

        let ptr = if len == 0 {
            NonNull::dangling()
        } else {
            let layout = Self::layout(len, align).ok_or_else(overflow)?;
            // SAFETY: layout has a non-zero size.
            let raw = unsafe { alloc_zeroed(layout) };
            NonNull::new(raw as *mut f32).ok_or(RenderError::Allocation {
                bytes: layout.size(),
                align,
            })?
        };

        Ok(Self {
            ptr,
            len,
            align,
            block_len,
            logical: lanes,
        })
    }

    /// A single block of `stride` lanes.
    pub fn block(width: usize, stride: usize) -> Result<Self> {
        Self::for_lanes(width, stride, stride)
    }

    fn layout(len: usize, align: usize) -> Option<Layout> {
        let bytes = len.checked_mul(mem::size_of::<f32>())?;
        Layout::from_size_align(bytes, align).ok()
    }

    /// Number of lanes that map to real grid coordinates.
    pub fn logical_lanes(&self) -> usize {
        self.logical
    }

    /// Number of floats in one block.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    pub fn block_count(&self) -> usize {
        if self.block_len == 0 {
            0
        } else {
            self.len / self.block_len
        }
    }

    pub fn alignment(&self) -> usize {
        self.align
    }

    /// Block `index` as a read-only slice.
    pub fn block_at(&self, index: usize) -> &[f32] {
        let start = index * self.block_len;
        &self[start..start + self.block_len]
    }

    /// Block `index` as a mutable slice.
    pub fn block_at_mut(&mut self, index: usize) -> &mut [f32] {
        let start = index * self.block_len;
        let end = start + self.block_len;
        &mut self[start..end]
    }

    pub fn as_slice(&self) -> &[f32] {
        // SAFETY: ptr is valid for len initialised floats (or dangling with len 0).
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        // SAFETY: as above, and &mut self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for FeatureBuffer {
    fn drop(&mut self) {
        if self.len != 0 {
            if let Some(layout) = Self::layout(self.len, self.align) {
                // SAFETY: allocated in for_lanes with this exact layout.
                unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
            }
        }
    }
}

impl Deref for FeatureBuffer {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl DerefMut for FeatureBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_aligned(buf: &FeatureBuffer, align: usize) -> bool {
        (buf.as_ptr() as usize) % align == 0
    }

    #[test]
    fn rounds_lanes_up_to_whole_blocks() {
        let buf = FeatureBuffer::for_lanes(3, 10, 4).unwrap();
        assert_eq!(buf.block_len(), 12);
        assert_eq!(buf.block_count(), 3);
        assert_eq!(buf.len(), 36);
        assert_eq!(buf.logical_lanes(), 10);
    }

    #[test]
    fn allocation_is_zeroed_and_aligned() {
        for stride in [1, 2, 4, 8, 16] {
            let buf = FeatureBuffer::for_lanes(2, 33, stride).unwrap();
            assert_eq!(buf.alignment(), stride * 4);
            assert!(is_aligned(&buf, stride * 4), "stride {}", stride);
            assert!(buf.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn blocks_are_disjoint_windows() {
        let mut buf = FeatureBuffer::for_lanes(2, 4, 2).unwrap();
        buf.block_at_mut(1).copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf.block_at(0), &[0.0; 4]);
        assert_eq!(buf.block_at(1), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn single_block() {
        let buf = FeatureBuffer::block(5, 8).unwrap();
        assert_eq!(buf.block_count(), 1);
        assert_eq!(buf.len(), 40);
    }

    #[test]
    fn empty_buffer_does_not_allocate() {
        let buf = FeatureBuffer::for_lanes(1, 0, 4).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.block_count(), 0);
    }

    #[test]
    fn overflowing_request_is_an_error() {
        let err = FeatureBuffer::for_lanes(usize::MAX / 2, 8, 4).unwrap_err();
        assert!(matches!(err, RenderError::SizeOverflow { .. }));
    }
}
