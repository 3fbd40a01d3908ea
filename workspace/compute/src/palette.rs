//! Model color assignment: a fixed ten-color sequence tiled over the roster,
//! indexed by roster rank, with an unseeded reshuffle on demand.

use rand::seq::SliceRandom;
use rand::thread_rng;

/// The base color sequence. Repeats when the roster is longer than ten.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color used for disabled roster entries.
pub const DISABLED_COLOR: &str = "#d3d3d3";

/// Tiles the base palette to cover `model_count` roster entries.
pub fn color_cycle(model_count: usize) -> Vec<String> {
    PALETTE
        .iter()
        .cycle()
        .take(model_count)
        .map(|c| (*c).to_string())
        .collect()
}

/// Randomly permutes the base palette, then tiles it to cover `model_count`
/// roster entries. Any permutation is acceptable; there is no seed.
pub fn shuffled_color_cycle(model_count: usize) -> Vec<String> {
    let mut base: Vec<&str> = PALETTE.to_vec();
    base.shuffle(&mut thread_rng());
    base.iter()
        .cycle()
        .take(model_count)
        .map(|c| (*c).to_string())
        .collect()
}
