// ABOUTME: Sprint name derivation: "{projectKey}-{N}"
// ABOUTME: N is one past the highest trailing numeric suffix among siblings, never reused

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SUFFIX: Regex = Regex::new(r"-(\d+)$").unwrap();
}

/// Derives the next sprint name for a project from its existing sprints'
/// names. Max-based rather than count-based: deleting a sprint never frees
/// its number.
pub fn next_sprint_name<'a, I>(project_key: &str, existing_names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing_names
        .into_iter()
        .filter_map(|name| {
            SUFFIX
                .captures(name)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<u64>().ok())
        })
        .max()
        .unwrap_or(0);

    format!("{project_key}-{}", max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sprint_is_number_one() {
        assert_eq!(next_sprint_name("ABC", []), "ABC-1");
    }

    #[test]
    fn sequential_creation_counts_up() {
        assert_eq!(next_sprint_name("ABC", ["ABC-1"]), "ABC-2");
        assert_eq!(next_sprint_name("ABC", ["ABC-1", "ABC-2"]), "ABC-3");
    }

    #[test]
    fn deleted_numbers_are_never_reused() {
        // ABC-2 was deleted; the max is still 3, so the next is 4.
        assert_eq!(next_sprint_name("ABC", ["ABC-1", "ABC-3"]), "ABC-4");
    }

    #[test]
    fn names_without_a_numeric_suffix_are_ignored() {
        assert_eq!(next_sprint_name("ABC", ["legacy", "ABC-beta"]), "ABC-1");
        assert_eq!(next_sprint_name("ABC", ["legacy", "ABC-7"]), "ABC-8");
    }

    #[test]
    fn only_the_trailing_suffix_counts() {
        assert_eq!(next_sprint_name("V2", ["V2-9-review"]), "V2-1");
    }
}
