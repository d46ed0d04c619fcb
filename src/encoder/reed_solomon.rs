/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use std::sync::OnceLock;

/// Primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
const PRIMITIVE_POLY: u16 = 0x11D;

/// Largest correction codeword count per block in any version/level (Table 9)
pub const MAX_DEGREE: usize = 30;

/// GF(256) field operations using log/exp tables
pub struct Gf256;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    // alpha^255 == 1
    exp[255] = exp[0];
    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();
static EXP_TABLE: [u8; 256] = TABLES.0;
static LOG_TABLE: [u8; 256] = TABLES.1;

impl Gf256 {
    /// Field addition (XOR)
    pub fn add(a: u8, b: u8) -> u8 {
        a ^ b
    }

    /// Field multiplication via log/antilog tables
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// Field division; `b` must be non-zero
    pub fn div(a: u8, b: u8) -> u8 {
        assert!(b != 0, "division by zero in GF(256)");
        if a == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + 255 - log_b) % 255]
    }

    /// `a` raised to `n`
    pub fn pow(a: u8, n: usize) -> u8 {
        if n == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        EXP_TABLE[(log_a * (n % 255)) % 255]
    }

    /// alpha^n for the primitive element alpha = 2
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }
}

/// Generator polynomial prod_{i=0}^{degree-1} (x - alpha^i), leading 1 omitted,
/// coefficients from x^(degree-1) down to x^0
fn compute_generator(degree: usize) -> Vec<u8> {
    let mut poly = vec![0u8; degree];
    poly[degree - 1] = 1;
    let mut root = 1u8;
    for _ in 0..degree {
        // multiply by (x - root)
        for j in 0..degree {
            poly[j] = Gf256::mul(poly[j], root);
            if j + 1 < degree {
                poly[j] ^= poly[j + 1];
            }
        }
        root = Gf256::mul(root, 0x02);
    }
    poly
}

static GENERATORS: [OnceLock<Vec<u8>>; MAX_DEGREE + 1] = [const { OnceLock::new() }; MAX_DEGREE + 1];

/// Cached generator polynomial for `degree` correction codewords
///
/// Each degree is computed once per process and shared read-only afterwards.
pub fn generator(degree: usize) -> &'static [u8] {
    assert!(
        (1..=MAX_DEGREE).contains(&degree),
        "generator degree {degree} out of range"
    );
    GENERATORS[degree].get_or_init(|| compute_generator(degree))
}

/// Reed-Solomon encoder for one block size
pub struct ReedSolomonEncoder {
    generator: &'static [u8],
}

impl ReedSolomonEncoder {
    /// Encoder producing `num_ecc_codewords` correction codewords per block
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self {
            generator: generator(num_ecc_codewords),
        }
    }

    /// Correction codewords per block
    pub fn num_ecc_codewords(&self) -> usize {
        self.generator.len()
    }

    /// Remainder of data(x) * x^k divided by the generator, k = correction count
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let degree = self.generator.len();
        let mut remainder = vec![0u8; degree];
        for &b in data {
            let factor = b ^ remainder[0];
            remainder.rotate_left(1);
            remainder[degree - 1] = 0;
            for (r, &g) in remainder.iter_mut().zip(self.generator) {
                *r ^= Gf256::mul(g, factor);
            }
        }
        remainder
    }
}

/// Syndromes of a codeword (data followed by correction codewords); all zero
/// when the block is a valid codeword. c[0] is the coefficient of x^(n-1).
pub fn syndromes(codeword: &[u8], num_ecc_codewords: usize) -> Vec<u8> {
    (0..num_ecc_codewords)
        .map(|i| {
            let alpha_i = Gf256::exp(i);
            codeword
                .iter()
                .fold(0u8, |acc, &c| Gf256::mul(acc, alpha_i) ^ c)
        })
        .collect()
}
