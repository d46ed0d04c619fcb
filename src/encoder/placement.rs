//! Zig-zag data placement (ISO/IEC 18004:2015 7.7.3)
//!
//! Data cells are visited in two-module-wide columns starting at the
//! bottom-right corner, alternating upward and downward, right cell before
//! left cell, skipping the vertical timing column and every function module.

use crate::encoder::function_mask::FunctionMask;

/// Explicit cursor over the data cells of a symbol, yielding `(x, y)`
#[derive(Debug, Clone)]
pub struct ZigzagCursor<'a> {
    mask: &'a FunctionMask,
    /// Right-hand column of the current pair; `None` once exhausted
    right: Option<usize>,
    /// Steps taken within the current column pair (0..2 * size)
    step: usize,
}

impl<'a> ZigzagCursor<'a> {
    /// Cursor at the bottom-right corner of the symbol
    pub fn new(mask: &'a FunctionMask) -> Self {
        Self {
            mask,
            right: Some(mask.size() - 1),
            step: 0,
        }
    }

    // Column pairs to the right of the timing column move upward first
    fn upward(right: usize) -> bool {
        (right + 1) & 2 == 0
    }

    // Cell of the raw step in the current pair, function cells included
    fn cell_at(&self, right: usize) -> (usize, usize) {
        let size = self.mask.size();
        let vert = self.step / 2;
        let x = right - self.step % 2;
        let y = if Self::upward(right) {
            size - 1 - vert
        } else {
            vert
        };
        (x, y)
    }

    fn advance(&mut self, right: usize) {
        self.step += 1;
        if self.step == 2 * self.mask.size() {
            self.step = 0;
            self.right = match right {
                1 => None,
                // the pair after (8, 7) is (5, 4); column 6 is timing
                8 => Some(5),
                r => Some(r - 2),
            };
        }
    }
}

impl Iterator for ZigzagCursor<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        while let Some(right) = self.right {
            let (x, y) = self.cell_at(right);
            self.advance(right);
            if !self.mask.is_function(x, y) {
                return Some((x, y));
            }
        }
        None
    }
}

/// Codeword bits, most significant bit first
pub fn codeword_bits(codewords: &[u8]) -> impl Iterator<Item = bool> + '_ {
    codewords
        .iter()
        .flat_map(|&cw| (0..8).rev().map(move |i| (cw >> i) & 1 != 0))
}
