//! Host character sequence conversion.

use crate::error::BadArg;

/// A host value that may hold a character sequence.
///
/// A character sequence is a proper list of integer code points. Anything
/// else (binaries, improper lists, lists holding non-integers) is not one.
pub trait HostString {
    /// Returns the raw code points of the value, or `None` if the value is
    /// not a character sequence.
    fn code_points(&self) -> Option<Vec<i64>>;
}

impl HostString for str {
    fn code_points(&self) -> Option<Vec<i64>> {
        Some(self.chars().map(|c| c as i64).collect())
    }
}

impl HostString for String {
    fn code_points(&self) -> Option<Vec<i64>> {
        self.as_str().code_points()
    }
}

impl HostString for [i64] {
    fn code_points(&self) -> Option<Vec<i64>> {
        Some(self.to_vec())
    }
}

impl HostString for Vec<i64> {
    fn code_points(&self) -> Option<Vec<i64>> {
        Some(self.clone())
    }
}

impl<T> HostString for &T
where
    T: HostString + ?Sized,
{
    fn code_points(&self) -> Option<Vec<i64>> {
        (**self).code_points()
    }
}

/// Converts a host character sequence into a UTF-8 Rust `String`.
///
/// Every code point must be a Unicode scalar value other than U+0000, since
/// the result ends up in a null-terminated buffer.
pub fn to_utf8(value: &(impl HostString + ?Sized)) -> Result<String, BadArg> {
    let code_points = value.code_points().ok_or(BadArg::NotAString)?;

    let mut string = String::with_capacity(code_points.len());
    for (index, code_point) in code_points.into_iter().enumerate() {
        let c = u32::try_from(code_point)
            .ok()
            .and_then(char::from_u32)
            .ok_or(BadArg::NotAString)?;
        if c == '\0' {
            return Err(BadArg::InteriorNul(index));
        }
        string.push(c);
    }

    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Atom;

    impl HostString for Atom {
        fn code_points(&self) -> Option<Vec<i64>> {
            None
        }
    }

    #[test]
    fn converts_code_points_to_utf8() {
        assert_eq!(to_utf8(".a { b: c }").unwrap(), ".a { b: c }");
        assert_eq!(to_utf8(&vec![0xe9_i64, 0x1f980]).unwrap(), "é🦀");
        assert_eq!(to_utf8(&vec![0xe9_i64]).unwrap().len(), 2);
    }

    #[test]
    fn empty_sequence_is_valid() {
        assert_eq!(to_utf8(&Vec::<i64>::new()).unwrap(), "");
    }

    #[test]
    fn rejects_non_sequences() {
        assert_eq!(to_utf8(&Atom), Err(BadArg::NotAString));
    }

    #[test]
    fn rejects_invalid_code_points() {
        for invalid in &[-1, 0xd800, 0xdfff, 0x110000, i64::MAX] {
            assert_eq!(to_utf8(&vec![0x61_i64, *invalid]), Err(BadArg::NotAString));
        }
    }

    #[test]
    fn rejects_nul() {
        assert_eq!(to_utf8(&vec![0x61_i64, 0x62, 0]), Err(BadArg::InteriorNul(2)));
    }
}
