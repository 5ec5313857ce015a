/// Write `n` in base 8 and read the resulting digit string back as a decimal
/// integer.
///
/// This is a display helper for dial labels, not a numeric conversion: the
/// value returned is only meaningful when printed with `{}`.
///
/// Arguments
/// -----------------
/// * `n`: any non-negative integer, typically a dial bin.
///
/// Return
/// ----------
/// * The octal digits of `n` packed as decimal digits (`12 -> 14`, `9 -> 11`).
///   `u32::MAX` needs 11 octal digits, hence the `u64` result.
pub fn decimal_digit_repack(mut n: u32) -> u64 {
    let mut result = 0u64;
    let mut place = 1u64;
    while n > 0 {
        result += u64::from(n % 8) * place;
        n /= 8;
        place *= 10;
    }
    result
}

#[cfg(test)]
mod digits_test {
    use super::*;

    #[test]
    fn test_decimal_digit_repack() {
        assert_eq!(decimal_digit_repack(0), 0);
        assert_eq!(decimal_digit_repack(7), 7);
        assert_eq!(decimal_digit_repack(8), 10);
        assert_eq!(decimal_digit_repack(9), 11);
        assert_eq!(decimal_digit_repack(12), 14);
        assert_eq!(decimal_digit_repack(63), 77);
        assert_eq!(decimal_digit_repack(4095), 7777);
    }

    #[test]
    fn test_decimal_digit_repack_matches_octal_formatting() {
        for n in [1u32, 511, 512, 1_000_000, u32::MAX] {
            let expected: u64 = format!("{n:o}").parse().unwrap();
            assert_eq!(decimal_digit_repack(n), expected);
        }
        assert_eq!(decimal_digit_repack(u32::MAX), 37_777_777_777);
    }
}
