//! Formatting helpers for torrent status values.

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Human-readable byte count, e.g. `1.5 MiB`.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Transfer rate in bytes per second.
pub fn format_speed(bytes_per_sec: f64) -> String {
    if bytes_per_sec <= 0.0 {
        return "-".to_string();
    }
    format!("{}/s", format_size(bytes_per_sec as u64))
}

/// Progress percentage with one decimal.
pub fn format_progress(percent: f64) -> String {
    format!("{:.1}%", percent.clamp(0.0, 100.0))
}

/// Share ratio; the daemon reports -1 when it is undefined.
pub fn format_ratio(ratio: f64) -> String {
    if ratio < 0.0 {
        "∞".to_string()
    } else {
        format!("{:.3}", ratio)
    }
}

/// `1 torrent`, `3 torrents`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GiB");
    }

    #[test]
    fn speeds() {
        assert_eq!(format_speed(0.0), "-");
        assert_eq!(format_speed(2048.0), "2.0 KiB/s");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(format_progress(42.123), "42.1%");
        assert_eq!(format_progress(120.0), "100.0%");
    }

    #[test]
    fn ratios() {
        assert_eq!(format_ratio(-1.0), "∞");
        assert_eq!(format_ratio(1.5), "1.500");
    }

    #[test]
    fn plurals() {
        assert_eq!(plural(1, "torrent"), "1 torrent");
        assert_eq!(plural(0, "torrent"), "0 torrents");
    }
}
