use itertools::Itertools;
use std::fmt::Display;

/// Build a looping `values` list for an `<animate>` element.
///
/// The colors are rotated so the cycle starts at `index` and closes back on that same color,
/// giving `colors.len() + 1` entries separated by `"; "`. `index` wraps around the list.
pub fn generate_ramp<T: Display>(index: usize, colors: &[T]) -> String {
    if colors.is_empty() {
        return String::new();
    }
    let index = index % colors.len();
    colors[index..].iter().chain(&colors[..=index]).join("; ")
}
