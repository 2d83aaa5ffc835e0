// Bullet line normalization for one summary bucket.
//
// Splits on line boundaries, drops blanks, and strips hyphen/bullet
// markers plus whitespace from the left edge only. The right edge
// keeps everything but trailing whitespace, so a hyphen inside or at
// the end of a task line survives.

use crate::types::LineBlock;

fn is_bullet_marker(ch: char) -> bool {
    ch == '-' || ch == '•' || ch.is_whitespace()
}

/// Normalize raw bucket text into an ordered line block.
///
/// Idempotent: running the normalizer over an already-normalized
/// block's joined text yields the identical block.
pub fn normalize_lines(text: &str) -> LineBlock {
    let lines = text
        .lines()
        .map(|line| line.trim_start_matches(is_bullet_marker).trim_end().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    LineBlock::from_lines(lines)
}
