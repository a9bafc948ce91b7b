/// Converts a 1-based line and column, as reported by `serde_json`, into a
/// byte offset into `source`. Positions past the end clamp to `source.len()`.
///
/// Only called when an error occurs, so a linear scan is fine.
pub fn get_byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut current_line = 1;
    let mut line_start = 0;
    if line > 1 {
        for (i, c) in source.char_indices() {
            if c == '\n' {
                current_line += 1;
                if current_line == line {
                    line_start = i + 1;
                    break;
                }
            }
        }
        if current_line < line {
            return source.len();
        }
    }
    // serde_json reports the column of the offending byte, 0 at a line start
    let offset = line_start + column.saturating_sub(1);
    let offset = offset.min(source.len());
    // never split a multi-byte character
    (0..=offset)
        .rev()
        .find(|i| source.is_char_boundary(*i))
        .unwrap_or(0)
}
