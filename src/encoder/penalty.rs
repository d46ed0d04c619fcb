//! Mask penalty rules (ISO/IEC 18004:2015 7.8.3)

use crate::models::BitMatrix;

/// Same-colour run of five modules, plus one per extra module
const N1: u32 = 3;
/// Each 2x2 block of one colour
const N2: u32 = 3;
/// Each 1:1:3:1:1 finder-like pattern with four light modules on one side
const N3: u32 = 40;
/// Each 5% step of dark-module deviation from 50%
const N4: u32 = 10;

/// Penalty broken down by rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Penalty {
    /// Rule 1: same-colour runs in rows and columns
    pub runs: u32,
    /// Rule 2: uniform 2x2 blocks
    pub blocks: u32,
    /// Rule 3: finder-like patterns
    pub finder_like: u32,
    /// Rule 4: dark/light imbalance
    pub balance: u32,
}

impl Penalty {
    /// Sum of all four rules
    pub fn total(&self) -> u32 {
        self.runs + self.blocks + self.finder_like + self.balance
    }
}

/// Score a fully masked symbol (format information included)
pub fn evaluate(matrix: &BitMatrix) -> Penalty {
    let size = matrix.width();
    let mut penalty = Penalty::default();
    for i in 0..size {
        let (runs, finders) = line_penalty(matrix.row(i), size);
        penalty.runs += runs;
        penalty.finder_like += finders;
        let (runs, finders) = line_penalty(matrix.column(i), size);
        penalty.runs += runs;
        penalty.finder_like += finders;
    }
    penalty.blocks = block_penalty(matrix);
    penalty.balance = balance_penalty(matrix);
    penalty
}

/// Total penalty score
pub fn score(matrix: &BitMatrix) -> u32 {
    evaluate(matrix).total()
}

// Run lengths of the last seven runs, most recent first. The light border
// outside the symbol counts as part of the first and last light runs.
struct RunHistory {
    runs: [usize; 7],
    size: usize,
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self { runs: [0; 7], size }
    }

    fn push(&mut self, mut length: usize) {
        if self.runs[0] == 0 {
            length += self.size;
        }
        self.runs.rotate_right(1);
        self.runs[0] = length;
    }

    // Dark-light-dark(3)-light-dark in the middle five runs, with a
    // light run of four on either side
    fn count_patterns(&self) -> u32 {
        let r = &self.runs;
        let n = r[1];
        let core = n > 0 && r[2] == n && r[3] == n * 3 && r[4] == n && r[5] == n;
        u32::from(core && r[0] >= n * 4 && r[6] >= n) + u32::from(core && r[6] >= n * 4 && r[0] >= n)
    }

    fn terminate(&mut self, dark: bool, mut length: usize) -> u32 {
        if dark {
            self.push(length);
            length = 0;
        }
        self.push(length + self.size);
        self.count_patterns()
    }
}

// Rule 1 and rule 3 along one row or column
fn line_penalty(line: impl Iterator<Item = bool>, size: usize) -> (u32, u32) {
    let mut runs = 0;
    let mut finders = 0;
    let mut history = RunHistory::new(size);
    let mut colour = false;
    let mut length = 0usize;
    for module in line {
        if module == colour {
            length += 1;
            if length == 5 {
                runs += N1;
            } else if length > 5 {
                runs += 1;
            }
        } else {
            history.push(length);
            if !colour {
                finders += history.count_patterns() * N3;
            }
            colour = module;
            length = 1;
        }
    }
    finders += history.terminate(colour, length) * N3;
    (runs, finders)
}

// Rule 2
fn block_penalty(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut penalty = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let c = matrix.get(x, y);
            if c == matrix.get(x + 1, y) && c == matrix.get(x, y + 1) && c == matrix.get(x + 1, y + 1) {
                penalty += N2;
            }
        }
    }
    penalty
}

// Rule 4: k is the smallest integer with |dark/total - 1/2| <= (k + 1) / 20
fn balance_penalty(matrix: &BitMatrix) -> u32 {
    let total = matrix.width() * matrix.height();
    if total == 0 {
        return 0;
    }
    let dark = matrix.count_ones();
    let k = (dark * 20).abs_diff(total * 10).div_ceil(total).saturating_sub(1);
    k as u32 * N4
}
