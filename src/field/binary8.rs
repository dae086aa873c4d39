use super::FieldOps;

/// Reduction polynomial x^8 + x^4 + x^3 + x^2 + 1, generator 2
const PRIME: u16 = 0x11D;

const fn generate_tables() -> ([u8; 256], [u8; 512]) {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0usize;
    while i < 255 {
        exp[i] = x as u8;
        exp[i + 255] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIME;
        }
        i += 1;
    }
    (log, exp)
}

const TABLES: ([u8; 256], [u8; 512]) = generate_tables();
static LOG_TABLE: [u8; 256] = TABLES.0;
static EXP_TABLE: [u8; 512] = TABLES.1;

/// Multiplication row for a fixed nonzero scalar
#[inline]
fn scalar_row(scalar: u32) -> [u8; 256] {
    let log_scalar = LOG_TABLE[scalar as usize] as usize;
    let mut row = [0u8; 256];
    for (value, out) in row.iter_mut().enumerate().skip(1) {
        *out = EXP_TABLE[LOG_TABLE[value] as usize + log_scalar];
    }
    row
}

/// GF(2^8), one element per byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary8;

impl FieldOps for Binary8 {
    fn degree(&self) -> u32 {
        8
    }

    #[inline]
    fn multiply(&self, a: u32, b: u32) -> u32 {
        debug_assert!(a < 256 && b < 256);
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize] as u32
    }

    fn invert(&self, a: u32) -> u32 {
        assert!(a != 0 && a < 256, "cannot invert {a} in GF(2^8)");
        EXP_TABLE[255 - LOG_TABLE[a as usize] as usize] as u32
    }

    #[inline]
    fn get_value(&self, data: &[u8], index: usize) -> u32 {
        data[index] as u32
    }

    #[inline]
    fn set_value(&self, data: &mut [u8], index: usize, value: u32) {
        debug_assert!(value < 256);
        data[index] = value as u8;
    }

    fn multiply_add(&self, dst: &mut [u8], src: &[u8], scalar: u32) {
        debug_assert_eq!(dst.len(), src.len());
        match scalar {
            0 => {}
            1 => self.add_assign(dst, src),
            _ => {
                let row = scalar_row(scalar);
                for (d, s) in dst.iter_mut().zip(src) {
                    *d ^= row[*s as usize];
                }
            }
        }
    }

    fn multiply_assign(&self, dst: &mut [u8], scalar: u32) {
        match scalar {
            0 => dst.fill(0),
            1 => {}
            _ => {
                let row = scalar_row(scalar);
                for d in dst.iter_mut() {
                    *d = row[*d as usize];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction() {
        assert_eq!(Binary8.multiply(2, 0x80), 0x1D);
        assert_eq!(Binary8.multiply(3, 7), 9);
    }

    #[test]
    fn test_scalar_row_matches_multiply() {
        let row = scalar_row(0x53);
        for value in 0..256u32 {
            assert_eq!(row[value as usize] as u32, Binary8.multiply(0x53, value));
        }
    }

    #[test]
    #[should_panic]
    fn test_divide_by_zero_panics() {
        Binary8.divide(5, 0);
    }
}
