//! Human-readable size reporting for encoded results.

const BYTES_PER_KB: f64 = 1024.0;
const KB_PER_MB: f64 = 1024.0;

/// Size of a byte count in kilobytes (1 KB = 1024 bytes).
pub fn size_in_kb(byte_len: usize) -> f64 {
    byte_len as f64 / BYTES_PER_KB
}

/// Format a size in kilobytes for display.
///
/// Sizes below 1024 KB are rounded to a whole number of kilobytes
/// (`"512 KB"`); larger sizes are shown in megabytes with two decimals
/// (`"1.50 MB"`).
pub fn format_file_size(size_kb: f64) -> String {
    if size_kb < KB_PER_MB {
        format!("{} KB", size_kb.round())
    } else {
        format!("{:.2} MB", size_kb / KB_PER_MB)
    }
}

/// Whether `size_kb` exceeds a limit given in megabytes.
pub fn exceeds_limit(size_kb: f64, max_size_mb: f64) -> bool {
    size_kb > max_size_mb * KB_PER_MB
}
