use std::fmt::{self, Display, Formatter};

pub(crate) type BuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasher>;

/// Displays the items of a slice separated by a fixed string.
pub struct ListDisplay<'a, T>(pub &'a [T], pub &'a str);

impl<T: Display> Display for ListDisplay<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut did_something = false;
        for item in self.0.iter() {
            if did_something {
                f.write_str(self.1)?;
            }
            Display::fmt(item, f)?;
            did_something = true;
        }
        Ok(())
    }
}

/// Collapses every run of whitespace into a single space and trims both ends.
///
/// Student answers are compared after normalization, so `"∃x ∈ ℝ,  P"` and
/// `"∃x ∈ ℝ, P"` are the same answer.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_display_joins_with_separator() {
        let items = ["p → q", "p"];
        assert_eq!(ListDisplay(&items, ", ").to_string(), "p → q, p");
        let empty: [&str; 0] = [];
        assert_eq!(ListDisplay(&empty, ", ").to_string(), "");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(normalize_whitespace("  ∃x ∈ ℝ,   ¬(x² ≥ 0) "), "∃x ∈ ℝ, ¬(x² ≥ 0)");
    }
}
