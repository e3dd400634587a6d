mod coalesce;
mod myers;
mod raw_operation;

use coalesce::coalesce;
use myers::myers_diff;
pub use raw_operation::RawOperation;

/// Character-level diff between `old` and `new`.
///
/// The result is a sequence of maximal runs: equal runs alternate with
/// changed regions, and every changed region lists its removed characters
/// before its added ones. Characters are Unicode scalar values.
///
/// Empty or identical inputs yield an empty or a single equal run.
#[must_use]
pub fn diff_chars(old: &str, new: &str) -> Vec<RawOperation<char>> {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();

    coalesce(myers_diff(&old, &new))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(diff_chars("", ""), vec![]);
        assert_eq!(
            diff_chars("same", "same"),
            vec![RawOperation::Equal("same".chars().collect())]
        );
    }

    #[test]
    fn test_appended_text() {
        assert_eq!(
            diff_chars("hello", "hello world"),
            vec![
                RawOperation::Equal("hello".chars().collect()),
                RawOperation::Insert(" world".chars().collect()),
            ]
        );
    }

    #[test]
    fn test_replaced_line() {
        assert_eq!(
            diff_chars("A\nB", "A\nC"),
            vec![
                RawOperation::Equal("A\n".chars().collect()),
                RawOperation::Delete(vec!['B']),
                RawOperation::Insert(vec!['C']),
            ]
        );
    }
}
