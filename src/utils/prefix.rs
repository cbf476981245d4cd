//! Byte-string prefix helpers shared by the store and the counters.

/// Length of the longest common prefix of two byte strings
#[inline]
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
