//! Structural pattern drawing and codeword placement

use crate::encoder::format::{self, FormatInfo};
use crate::encoder::function_mask::{self, FunctionMask};
use crate::encoder::placement::{self, ZigzagCursor};
use crate::encoder::tables;
use crate::encoder::version::VersionInfo;
use crate::models::{BitMatrix, Version};

/// Build-time state of one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// Not written yet
    Unset,
    /// Finder, separator, timing, alignment, format or version cell
    Reserved,
    /// Codeword or remainder bit
    Data,
}

/// Owns the module grid while a symbol is being assembled
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    version: Version,
    function: &'static FunctionMask,
    modules: BitMatrix,
    kinds: Vec<ModuleKind>,
}

impl MatrixBuilder {
    /// Empty grid for `version`, every cell unset
    pub fn new(version: Version) -> Self {
        let size = version.size();
        Self {
            version,
            function: FunctionMask::for_version(version),
            modules: BitMatrix::square(size),
            kinds: vec![ModuleKind::Unset; size * size],
        }
    }

    /// Reserved-cell map shared by every symbol of this version
    pub fn function_mask(&self) -> &'static FunctionMask {
        self.function
    }

    /// Build-time state of the module at (x, y)
    pub fn kind(&self, x: usize, y: usize) -> ModuleKind {
        self.kinds[y * self.version.size() + x]
    }

    /// Module colour as currently drawn (true = dark)
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        assert!(
            self.function.is_function(x, y),
            "({x}, {y}) is not a function module"
        );
        let size = self.version.size();
        self.kinds[y * size + x] = ModuleKind::Reserved;
        self.modules.set(x, y, dark);
    }

    /// Draw every structural pattern and reserve the format and version areas
    ///
    /// Format cells are left light here; the mask selector writes them.
    pub fn draw_function_patterns(&mut self) {
        let size = self.version.size();

        // Timing patterns first; finders and alignment overwrite their ends
        for i in 0..size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }

        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        for (cx, cy) in function_mask::alignment_centres(self.version) {
            self.draw_alignment_pattern(cx, cy);
        }

        for i in 0..15 {
            for (x, y) in FormatInfo::positions(size, i) {
                self.set_function(x, y, false);
            }
        }
        let (x, y) = format::dark_module(size);
        self.set_function(x, y, true);

        self.draw_version_info();
    }

    // 7x7 finder centred at (cx, cy) plus its one-module light separator
    fn draw_finder_pattern(&mut self, cx: usize, cy: usize) {
        let size = self.version.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if (0..size).contains(&x) && (0..size).contains(&y) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
                }
            }
        }
    }

    // 5x5 alignment pattern: dark ring, light ring, dark centre
    fn draw_alignment_pattern(&mut self, cx: usize, cy: usize) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let x = (cx as isize + dx) as usize;
                let y = (cy as isize + dy) as usize;
                self.set_function(x, y, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    fn draw_version_info(&mut self) {
        let Some(bits) = VersionInfo::bits(self.version) else {
            return;
        };
        let size = self.version.size();
        for i in 0..VersionInfo::LEN {
            let dark = (bits >> i) & 1 != 0;
            for (x, y) in VersionInfo::positions(size, i) {
                self.set_function(x, y, dark);
            }
        }
    }

    /// Write the interleaved codeword stream along the zig-zag path
    ///
    /// Cells left over once the stream is exhausted are the remainder bits
    /// and stay light.
    pub fn place_codewords(&mut self, codewords: &[u8]) {
        let size = self.version.size();
        let mut bits = placement::codeword_bits(codewords);
        let mut leftover = 0usize;
        for (x, y) in ZigzagCursor::new(self.function) {
            let kind = &mut self.kinds[y * size + x];
            assert_eq!(*kind, ModuleKind::Unset, "data cell ({x}, {y}) written twice");
            *kind = ModuleKind::Data;
            match bits.next() {
                Some(dark) => self.modules.set(x, y, dark),
                None => leftover += 1,
            }
        }
        assert!(bits.next().is_none(), "codeword stream longer than the data area");

        let remainder = tables::remainder_bits(self.version);
        if leftover > remainder {
            tracing::warn!(
                version = self.version.number(),
                leftover,
                remainder,
                "data area not filled by codeword stream"
            );
        }
    }

    /// Unmasked module grid; panics if any cell was never written
    pub fn finish(self) -> BitMatrix {
        assert!(
            !self.kinds.contains(&ModuleKind::Unset),
            "symbol has unset modules"
        );
        self.modules
    }
}
