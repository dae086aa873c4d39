use super::FieldOps;

/// Reduction polynomial x^4 + x + 1
const PRIME: u8 = 0x13;

const fn slow_multiply(a: u8, b: u8) -> u8 {
    let mut result = 0u8;
    let mut a = a;
    let mut b = b;
    while b != 0 {
        if b & 1 != 0 {
            result ^= a;
        }
        a <<= 1;
        if a & 0x10 != 0 {
            a ^= PRIME;
        }
        b >>= 1;
    }
    result
}

const fn generate_multiply_table() -> [[u8; 16]; 16] {
    let mut table = [[0u8; 16]; 16];
    let mut a = 0;
    while a < 16 {
        let mut b = 0;
        while b < 16 {
            table[a][b] = slow_multiply(a as u8, b as u8);
            b += 1;
        }
        a += 1;
    }
    table
}

const fn generate_inverse_table() -> [u8; 16] {
    let mut table = [0u8; 16];
    let mut a = 1;
    while a < 16 {
        let mut b = 1;
        while b < 16 {
            if slow_multiply(a as u8, b as u8) == 1 {
                table[a] = b as u8;
            }
            b += 1;
        }
        a += 1;
    }
    table
}

static MULTIPLY_TABLE: [[u8; 16]; 16] = generate_multiply_table();
static INVERSE_TABLE: [u8; 16] = generate_inverse_table();

/// GF(2^4), two elements per byte (even index in the low nibble)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary4;

impl FieldOps for Binary4 {
    fn degree(&self) -> u32 {
        4
    }

    #[inline]
    fn multiply(&self, a: u32, b: u32) -> u32 {
        debug_assert!(a < 16 && b < 16);
        MULTIPLY_TABLE[a as usize][b as usize] as u32
    }

    fn invert(&self, a: u32) -> u32 {
        assert!(a != 0 && a < 16, "cannot invert {a} in GF(16)");
        INVERSE_TABLE[a as usize] as u32
    }

    #[inline]
    fn get_value(&self, data: &[u8], index: usize) -> u32 {
        let byte = data[index / 2];
        if index % 2 == 0 {
            (byte & 0x0F) as u32
        } else {
            (byte >> 4) as u32
        }
    }

    #[inline]
    fn set_value(&self, data: &mut [u8], index: usize, value: u32) {
        debug_assert!(value < 16);
        let byte = &mut data[index / 2];
        if index % 2 == 0 {
            *byte = (*byte & 0xF0) | value as u8;
        } else {
            *byte = (*byte & 0x0F) | ((value as u8) << 4);
        }
    }

    fn multiply_add(&self, dst: &mut [u8], src: &[u8], scalar: u32) {
        debug_assert_eq!(dst.len(), src.len());
        match scalar {
            0 => {}
            1 => self.add_assign(dst, src),
            _ => {
                let row = &MULTIPLY_TABLE[scalar as usize];
                for (d, s) in dst.iter_mut().zip(src) {
                    *d ^= row[(*s & 0x0F) as usize] | (row[(*s >> 4) as usize] << 4);
                }
            }
        }
    }

    fn multiply_assign(&self, dst: &mut [u8], scalar: u32) {
        match scalar {
            0 => dst.fill(0),
            1 => {}
            _ => {
                let row = &MULTIPLY_TABLE[scalar as usize];
                for d in dst.iter_mut() {
                    *d = row[(*d & 0x0F) as usize] | (row[(*d >> 4) as usize] << 4);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_products() {
        // x * x^3 = x^4 = x + 1
        assert_eq!(Binary4.multiply(2, 8), 3);
        assert_eq!(Binary4.multiply(0xF, 0xF), slow_multiply(0xF, 0xF) as u32);
        assert_eq!(Binary4.invert(1), 1);
    }

    #[test]
    fn test_nibble_packing() {
        let mut data = [0u8; 1];
        Binary4.set_value(&mut data, 0, 0x3);
        Binary4.set_value(&mut data, 1, 0xC);
        assert_eq!(data, [0xC3]);
    }

    #[test]
    fn test_multiply_assign_both_nibbles() {
        let mut data = [0x21u8];
        Binary4.multiply_assign(&mut data, 2);
        assert_eq!(data, [0x42]);
    }
}
