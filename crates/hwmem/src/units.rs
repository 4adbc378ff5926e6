//! Byte-count helpers for reports

pub const KIBIBYTE: u64 = 1024;
pub const MEBIBYTE: u64 = 1024 * KIBIBYTE;
pub const GIBIBYTE: u64 = 1024 * MEBIBYTE;
pub const TEBIBYTE: u64 = 1024 * GIBIBYTE;

const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

/// Renders `bytes` in the largest binary unit it reaches, with one decimal.
///
/// The unit is picked after rounding, so values just under a boundary read
/// as `1.0` of the next unit rather than `1024.0` of the current one.
pub fn human_bytes(bytes: u64) -> String {
    if bytes < KIBIBYTE {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / KIBIBYTE as f64;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && (value * 10.0).round() >= 10240.0 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn renders_unit_boundaries() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(1023), "1023 B");
        assert_eq!(human_bytes(KIBIBYTE), "1.0 KiB");
        assert_eq!(human_bytes(512 * MEBIBYTE), "512.0 MiB");
        assert_eq!(human_bytes(GIBIBYTE + GIBIBYTE / 2), "1.5 GiB");
        assert_eq!(human_bytes(2 * TEBIBYTE), "2.0 TiB");
    }

    #[test]
    fn rounds_up_into_the_next_unit() {
        assert_eq!(human_bytes(GIBIBYTE - 1), "1.0 GiB");
        assert_eq!(human_bytes(MEBIBYTE - 1), "1.0 MiB");
        assert_eq!(human_bytes(1023 * MEBIBYTE), "1023.0 MiB");
    }

    #[test]
    fn largest_unit_keeps_growing() {
        assert_eq!(human_bytes(2048 * TEBIBYTE), "2048.0 TiB");
    }
}
