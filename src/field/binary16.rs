use super::FieldOps;
use std::sync::OnceLock;

/// Reduction polynomial x^16 + x^12 + x^3 + x + 1, generator 2
const PRIME: u32 = 0x1100B;
const ORDER: usize = 65535;

struct Tables {
    log: Vec<u16>,
    exp: Vec<u16>,
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut log = vec![0u16; ORDER + 1];
        let mut exp = vec![0u16; ORDER * 2];
        let mut x: u32 = 1;
        for i in 0..ORDER {
            exp[i] = x as u16;
            exp[i + ORDER] = x as u16;
            log[x as usize] = i as u16;
            x <<= 1;
            if x & 0x10000 != 0 {
                x ^= PRIME;
            }
        }
        Tables { log, exp }
    })
}

#[inline]
fn read(data: &[u8], index: usize) -> u16 {
    u16::from_le_bytes([data[2 * index], data[2 * index + 1]])
}

#[inline]
fn write(data: &mut [u8], index: usize, value: u16) {
    data[2 * index..2 * index + 2].copy_from_slice(&value.to_le_bytes());
}

/// GF(2^16), little-endian two bytes per element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary16;

impl FieldOps for Binary16 {
    fn degree(&self) -> u32 {
        16
    }

    #[inline]
    fn multiply(&self, a: u32, b: u32) -> u32 {
        debug_assert!(a <= 0xFFFF && b <= 0xFFFF);
        if a == 0 || b == 0 {
            return 0;
        }
        let t = tables();
        t.exp[t.log[a as usize] as usize + t.log[b as usize] as usize] as u32
    }

    fn invert(&self, a: u32) -> u32 {
        assert!(a != 0 && a <= 0xFFFF, "cannot invert {a} in GF(2^16)");
        let t = tables();
        t.exp[ORDER - t.log[a as usize] as usize] as u32
    }

    #[inline]
    fn get_value(&self, data: &[u8], index: usize) -> u32 {
        read(data, index) as u32
    }

    #[inline]
    fn set_value(&self, data: &mut [u8], index: usize, value: u32) {
        debug_assert!(value <= 0xFFFF);
        write(data, index, value as u16);
    }

    fn multiply_add(&self, dst: &mut [u8], src: &[u8], scalar: u32) {
        debug_assert_eq!(dst.len(), src.len());
        debug_assert_eq!(dst.len() % 2, 0);
        match scalar {
            0 => {}
            1 => self.add_assign(dst, src),
            _ => {
                let t = tables();
                let log_scalar = t.log[scalar as usize] as usize;
                for (d, s) in dst.chunks_exact_mut(2).zip(src.chunks_exact(2)) {
                    let value = u16::from_le_bytes([s[0], s[1]]);
                    if value != 0 {
                        let product = t.exp[t.log[value as usize] as usize + log_scalar];
                        let bytes = product.to_le_bytes();
                        d[0] ^= bytes[0];
                        d[1] ^= bytes[1];
                    }
                }
            }
        }
    }

    fn multiply_assign(&self, dst: &mut [u8], scalar: u32) {
        debug_assert_eq!(dst.len() % 2, 0);
        match scalar {
            0 => dst.fill(0),
            1 => {}
            _ => {
                let t = tables();
                let log_scalar = t.log[scalar as usize] as usize;
                for d in dst.chunks_exact_mut(2) {
                    let value = u16::from_le_bytes([d[0], d[1]]);
                    let product = if value == 0 {
                        0
                    } else {
                        t.exp[t.log[value as usize] as usize + log_scalar]
                    };
                    d.copy_from_slice(&product.to_le_bytes());
                }
            }
        }
    }
}
