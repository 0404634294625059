use crate::term::{Color, Console};

pub const PROGRESS_CELLS: usize = 16;

const FILLED: char = '\u{2588}';
const EMPTY: char = '\u{2591}';

/// Formats `label [████░░░░░░░░░░░░] 25.00%`. `fraction` is expected to be within 0..=1.
pub fn progress_line(label: &str, fraction: f32) -> String {
    let filled = ((fraction * PROGRESS_CELLS as f32) as usize).min(PROGRESS_CELLS);

    let mut line = String::with_capacity(label.len() + PROGRESS_CELLS * 3 + 12);
    line.push_str(label);
    line.push_str(" [");
    line.extend(std::iter::repeat(FILLED).take(filled));
    line.extend(std::iter::repeat(EMPTY).take(PROGRESS_CELLS - filled));
    line.push_str(&format!("] {:.2}%", fraction * 100.0));
    line
}

/// Redraws the progress bar over the current line.
pub fn draw(console: &mut dyn Console, label: &str, color: Color, fraction: f32) {
    console.replace(color, &progress_line(label, fraction));
}
