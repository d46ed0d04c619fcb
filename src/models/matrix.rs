/// Packed bit matrix holding one module per bit (true = dark)
///
/// Coordinates are `(x, y)` = `(column, row)`, origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-light matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height).div_ceil(8)],
        }
    }

    /// Create an all-light square matrix
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    fn locate(&self, x: usize, y: usize) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y * self.width + x;
        Some((index / 8, 1 << (index % 8)))
    }

    /// Get bit at (x, y); anything outside the matrix reads as light
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.locate(x, y)
            .is_some_and(|(byte, bit)| self.data[byte] & bit != 0)
    }

    /// Set bit at (x, y); writes outside the matrix are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some((byte, bit)) = self.locate(x, y) {
            if value {
                self.data[byte] |= bit;
            } else {
                self.data[byte] &= !bit;
            }
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if let Some((byte, bit)) = self.locate(x, y) {
            self.data[byte] ^= bit;
        }
    }

    /// Number of set (dark) bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterate one row as booleans, left to right
    pub fn row(&self, y: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.width).map(move |x| self.get(x, y))
    }

    /// Iterate one column as booleans, top to bottom
    pub fn column(&self, x: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.height).map(move |y| self.get(x, y))
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
