// Byte quantities rendered in the largest binary unit (B, KB, MB, ...)

use std::fmt;

const KIB: f64 = 1024.0;
const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Signed byte count. Displays as `0B`, `512B`, `1.00KB`, `32.00GB`, `-1.00GB`.
///
/// The unit is the largest one in which the magnitude is at least 1; the sign,
/// if any, is a leading `-` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ByteSize(pub i128);

impl ByteSize {
    pub fn bytes(self) -> i128 {
        self.0
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        if magnitude < 1024 {
            return write!(f, "{sign}{magnitude}B");
        }

        let mut value = magnitude as f64;
        let mut unit = 0;
        while value >= KIB && unit < UNITS.len() - 1 {
            value /= KIB;
            unit += 1;
        }
        write!(f, "{sign}{value:.2}{}", UNITS[unit])
    }
}
