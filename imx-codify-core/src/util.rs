/// Format a byte count for reports, e.g. "512 bytes", "4 KB", "1.5 MB".
///
/// Exact multiples of KB/MB print as whole numbers; anything else under
/// 1 KB prints in bytes and larger values get one decimal place.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes >= MB {
        if bytes.is_multiple_of(MB) {
            format!("{} MB", bytes / MB)
        } else {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        }
    } else if bytes >= KB {
        if bytes.is_multiple_of(KB) {
            format!("{} KB", bytes / KB)
        } else {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        }
    } else {
        format!("{} bytes", bytes)
    }
}

/// Space-separated uppercase hex, e.g. "DE AD BE EF".
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A checksum the way it is printed in reports: `0x29B1`.
pub fn format_checksum(value: u16) -> String {
    format!("0x{:04X}", value)
}
