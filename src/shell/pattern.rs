//! Bounded byte-string comparison.
//!
//! Comparison is case-sensitive and stops at the first mismatching byte or at the end of either
//! slice, whichever comes first. Nothing here reads past a slice boundary.

/// Number of leading bytes `a` and `b` have in common.
fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// `input` and `keyword` are the same bytes.
pub fn exact(input: &[u8], keyword: &[u8]) -> bool {
    input.len() == keyword.len() && common_prefix(input, keyword) == keyword.len()
}

/// If `input` begins with `keyword`, returns whatever follows it.
pub fn prefix<'a>(input: &'a [u8], keyword: &[u8]) -> Option<&'a [u8]> {
    if common_prefix(input, keyword) == keyword.len() {
        Some(&input[keyword.len()..])
    } else {
        None
    }
}

/// Drops one trailing `\n` and a `\r` right before it.
pub fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
