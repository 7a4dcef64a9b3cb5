//! Byte slice helpers shared by the DER and signature layers.
use std::borrow::Cow;

/// Left-pads the given slice with zeroes until `LEN`.
///
/// Returns the first `LEN` bytes if it does not need padding.
#[inline]
pub fn left_pad<const LEN: usize>(data: &[u8]) -> Cow<'_, [u8; LEN]> {
    if let Some(data) = data.first_chunk::<LEN>() {
        Cow::Borrowed(data)
    } else {
        let mut padded = [0; LEN];
        padded[LEN - data.len()..].copy_from_slice(data);
        Cow::Owned(padded)
    }
}

/// Strips leading zero bytes, keeping at least one byte of a non-empty slice.
///
/// An empty slice stays empty.
#[inline]
pub fn strip_leading_zeros(data: &[u8]) -> &[u8] {
    let first = data
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(data.len().saturating_sub(1));
    &data[first..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_padding() {
        let data = [1, 2, 3, 4];
        let padded = left_pad::<8>(&data);
        assert!(matches!(padded, Cow::Owned(_)));
        assert_eq!(padded[..], [0, 0, 0, 0, 1, 2, 3, 4]);

        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let padded = left_pad::<8>(&data);
        assert!(matches!(padded, Cow::Borrowed(_)));
        assert_eq!(padded[..], [1, 2, 3, 4, 5, 6, 7, 8]);

        let padded = left_pad::<4>(&[]);
        assert_eq!(padded[..], [0, 0, 0, 0]);
    }

    #[test]
    fn stripping() {
        assert_eq!(strip_leading_zeros(&[0, 0, 1, 0]), &[1, 0]);
        assert_eq!(strip_leading_zeros(&[0, 0, 0]), &[0]);
        assert_eq!(strip_leading_zeros(&[0x80]), &[0x80]);
        assert_eq!(strip_leading_zeros(&[]), &[] as &[u8]);
    }
}
