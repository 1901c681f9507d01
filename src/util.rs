//! Small utility helpers used across generators.

use rand::seq::SliceRandom;
use rand::Rng;

/// Random integer with inclusive bounds. Reversed bounds are swapped
/// rather than rejected, so a generator with a miscomputed range still
/// produces a value inside it.
pub fn rand_int(min: i64, max: i64) -> i64 {
  let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
  rand::thread_rng().gen_range(lo..=hi)
}

/// Random element of a slice. `None` on empty input; callers decide
/// whether that is a configuration error or a fallback path.
pub fn pick<T>(items: &[T]) -> Option<&T> {
  items.choose(&mut rand::thread_rng())
}

/// New shuffled copy of a slice (Fisher–Yates via rand).
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
  let mut out = items.to_vec();
  out.shuffle(&mut rand::thread_rng());
  out
}

/// True with probability `p`.
pub fn chance(p: f64) -> bool {
  rand::thread_rng().gen_bool(p.clamp(0.0, 1.0))
}
