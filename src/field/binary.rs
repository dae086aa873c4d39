use super::FieldOps;

/// GF(2), eight elements packed per byte (least significant bit first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Binary;

impl FieldOps for Binary {
    fn degree(&self) -> u32 {
        1
    }

    #[inline]
    fn multiply(&self, a: u32, b: u32) -> u32 {
        debug_assert!(a <= 1 && b <= 1);
        a & b
    }

    fn invert(&self, a: u32) -> u32 {
        assert_eq!(a, 1, "only 1 is invertible in GF(2)");
        1
    }

    #[inline]
    fn get_value(&self, data: &[u8], index: usize) -> u32 {
        ((data[index / 8] >> (index % 8)) & 1) as u32
    }

    #[inline]
    fn set_value(&self, data: &mut [u8], index: usize, value: u32) {
        debug_assert!(value <= 1);
        let mask = 1u8 << (index % 8);
        if value == 0 {
            data[index / 8] &= !mask;
        } else {
            data[index / 8] |= mask;
        }
    }

    fn multiply_add(&self, dst: &mut [u8], src: &[u8], scalar: u32) {
        debug_assert!(scalar <= 1);
        if scalar == 1 {
            self.add_assign(dst, src);
        }
    }

    fn multiply_assign(&self, dst: &mut [u8], scalar: u32) {
        debug_assert!(scalar <= 1);
        if scalar == 0 {
            dst.fill(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_packing() {
        let mut data = [0u8; 2];
        Binary.set_value(&mut data, 0, 1);
        Binary.set_value(&mut data, 9, 1);
        assert_eq!(data, [0b0000_0001, 0b0000_0010]);
        assert_eq!(Binary.get_value(&data, 9), 1);
        assert_eq!(Binary.get_value(&data, 8), 0);
    }

    #[test]
    fn test_multiply_add_is_xor() {
        let mut dst = [0b1100u8, 0xFF];
        Binary.multiply_add(&mut dst, &[0b1010, 0x0F], 1);
        assert_eq!(dst, [0b0110, 0xF0]);
        Binary.multiply_add(&mut dst, &[0xFF, 0xFF], 0);
        assert_eq!(dst, [0b0110, 0xF0]);
    }

    #[test]
    #[should_panic]
    fn test_invert_zero_panics() {
        Binary.invert(0);
    }
}
