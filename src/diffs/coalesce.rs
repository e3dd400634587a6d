use std::fmt::Debug;

use super::raw_operation::{RawOperation, push_joined};

/// Coalesces the operations of every changed region into at most one deletion
/// followed by at most one insertion.
///
/// Myers' algorithm can interleave the deletions and insertions of a changed
/// region, such as `DIDI`; this turns them into `DI` with the deleted and
/// inserted elements kept in their original order. Equal runs separate the
/// regions and are passed through.
pub fn coalesce<I, T>(raw_operations: I) -> Vec<RawOperation<T>>
where
    I: IntoIterator<Item = RawOperation<T>>,
    T: PartialEq + Clone + Debug,
{
    let mut pending_delete: Option<RawOperation<T>> = None;
    let mut pending_insert: Option<RawOperation<T>> = None;
    let mut result = Vec::new();

    for next in raw_operations {
        match next {
            RawOperation::Delete(..) => {
                pending_delete = Some(match pending_delete.take() {
                    Some(previous) => previous.join(next),
                    None => next,
                });
            }
            RawOperation::Insert(..) => {
                pending_insert = Some(match pending_insert.take() {
                    Some(previous) => previous.join(next),
                    None => next,
                });
            }
            RawOperation::Equal(..) => {
                flush(&mut result, &mut pending_delete, &mut pending_insert);
                push_joined(&mut result, next);
            }
        }
    }

    flush(&mut result, &mut pending_delete, &mut pending_insert);

    result
}

fn flush<T>(
    result: &mut Vec<RawOperation<T>>,
    pending_delete: &mut Option<RawOperation<T>>,
    pending_insert: &mut Option<RawOperation<T>>,
) where
    T: PartialEq + Clone + Debug,
{
    for operation in pending_delete.take().into_iter().chain(pending_insert.take()) {
        push_joined(result, operation);
    }
}
