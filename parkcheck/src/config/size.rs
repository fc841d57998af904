//! Human-readable byte sizes (`256MB`, `1.5 GB`).

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Parses a size such as `512`, `64KB`, `256 MB` or `1.5G`.
///
/// Units are binary (1 KB = 1024 bytes) and case-insensitive. Returns `None`
/// for anything else.
pub fn parse_size(input: &str) -> Option<u64> {
    let input = input.trim();
    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let multiplier = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => KB,
        "M" | "MB" => MB,
        "G" | "GB" => GB,
        _ => return None,
    };

    if number.is_empty() {
        return None;
    }
    if multiplier == 1 {
        return number.parse::<u64>().ok();
    }

    let value: f64 = number.parse().ok()?;
    Some((value * multiplier as f64).round() as u64)
}

/// Formats a byte count with the largest unit that keeps it above one.
pub fn format_size(bytes: u64) -> String {
    let (value, unit) = if bytes >= GB {
        (bytes as f64 / GB as f64, "GB")
    } else if bytes >= MB {
        (bytes as f64 / MB as f64, "MB")
    } else if bytes >= KB {
        (bytes as f64 / KB as f64, "KB")
    } else {
        return format!("{} B", bytes);
    };

    if value.fract() == 0.0 {
        format!("{} {}", value as u64, unit)
    } else {
        format!("{:.1} {}", value, unit)
    }
}
