// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Common leading bits of a set of doubles.

/// Accumulates the leading bits shared by the IEEE-754 representation of a
/// set of numbers.
///
/// If two numbers differ in sign or exponent the common value is `0.0`.
/// Otherwise it is the shared sign, exponent and leading mantissa bits, with
/// every lower bit cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonBits {
    first: bool,
    common_sign_exp: i64,
    common_bits: i64,
    common_mantissa_bits: u32,
}

impl CommonBits {
    pub fn new() -> Self {
        Self {
            first: true,
            ..Self::default()
        }
    }

    pub fn add(&mut self, num: f64) {
        let bits = num.to_bits() as i64;
        if self.first {
            self.common_bits = bits;
            self.common_sign_exp = sign_exp_bits(bits);
            self.first = false;
            return;
        }
        if sign_exp_bits(bits) != self.common_sign_exp {
            self.common_bits = 0;
            return;
        }
        self.common_mantissa_bits = common_mantissa_bits(self.common_bits, bits);
        self.common_bits = zero_lower_bits(self.common_bits, 64 - (12 + self.common_mantissa_bits));
    }

    /// The common value; `0.0` before anything was added.
    pub fn common(&self) -> f64 {
        f64::from_bits(self.common_bits as u64)
    }
}

/// Sign and 11-bit exponent.
fn sign_exp_bits(bits: i64) -> i64 {
    bits >> 52
}

/// Number of leading mantissa bits (counting the implicit bit position 52)
/// that agree; at most 52.
fn common_mantissa_bits(a: i64, b: i64) -> u32 {
    let mut count = 0;
    for i in (0..=52).rev() {
        if bit(a, i) != bit(b, i) {
            return count;
        }
        count += 1;
    }
    52
}

fn bit(bits: i64, i: u32) -> bool {
    bits & (1i64 << i) != 0
}

fn zero_lower_bits(bits: i64, n: u32) -> i64 {
    let inv_mask = (1i64 << n) - 1;
    bits & !inv_mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_is_its_own_common_value() {
        let mut cb = CommonBits::new();
        cb.add(123.456);
        assert_eq!(cb.common(), 123.456);
    }

    #[test]
    fn shared_prefix_is_kept() {
        let mut cb = CommonBits::new();
        cb.add(1_000_001.0);
        cb.add(1_000_002.0);
        let common = cb.common();
        assert!(common > 999_000.0 && common <= 1_000_001.0);
        // Removing the common part leaves small residues.
        assert!((1_000_001.0 - common) < 16.0);
        assert!((1_000_002.0 - common) < 16.0);
    }

    #[test]
    fn exponent_mismatch_gives_zero() {
        let mut cb = CommonBits::new();
        cb.add(1.5);
        cb.add(1000.0);
        assert_eq!(cb.common(), 0.0);
    }

    #[test]
    fn sign_mismatch_gives_zero() {
        let mut cb = CommonBits::new();
        cb.add(2.0);
        cb.add(-2.0);
        assert_eq!(cb.common(), 0.0);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(CommonBits::new().common(), 0.0);
    }
}
