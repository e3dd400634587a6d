use std::fmt::Debug;

/// A run of diffed elements tagged with how it relates the old sequence to
/// the new one.
///
/// Consecutive operations of the same kind can be joined into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOperation<T>
where
    T: PartialEq + Clone + Debug,
{
    Insert(Vec<T>),
    Delete(Vec<T>),
    Equal(Vec<T>),
}

impl<T> RawOperation<T>
where
    T: PartialEq + Clone + Debug,
{
    pub fn elements(&self) -> &[T] {
        match self {
            RawOperation::Insert(elements)
            | RawOperation::Delete(elements)
            | RawOperation::Equal(elements) => elements,
        }
    }

    pub fn is_empty(&self) -> bool { self.elements().is_empty() }

    pub fn is_same_kind(&self, other: &RawOperation<T>) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Extends the operation with another operation. Only operations of the
    /// same type as self can be used to extend self, otherwise the function
    /// will panic.
    pub fn join(self, other: RawOperation<T>) -> RawOperation<T> {
        debug_assert!(
            self.is_same_kind(&other),
            "Cannot join operations of different types. This should have been handled before \
             calling this function."
        );

        match (self, other) {
            (RawOperation::Insert(mut elements), RawOperation::Insert(rest)) => {
                elements.extend(rest);
                RawOperation::Insert(elements)
            }
            (RawOperation::Delete(mut elements), RawOperation::Delete(rest)) => {
                elements.extend(rest);
                RawOperation::Delete(elements)
            }
            (RawOperation::Equal(mut elements), RawOperation::Equal(rest)) => {
                elements.extend(rest);
                RawOperation::Equal(elements)
            }
            _ => unreachable!("Only operations of the same type can be joined"),
        }
    }
}

impl RawOperation<char> {
    /// The characters of the operation collected into a string.
    pub fn text(&self) -> String { self.elements().iter().collect() }
}

/// Push `operation` onto `operations`, joining it with the last operation if
/// both are of the same kind. Empty operations are dropped.
pub fn push_joined<T>(operations: &mut Vec<RawOperation<T>>, operation: RawOperation<T>)
where
    T: PartialEq + Clone + Debug,
{
    if operation.is_empty() {
        return;
    }

    match operations.pop() {
        Some(last) if last.is_same_kind(&operation) => operations.push(last.join(operation)),
        Some(last) => {
            operations.push(last);
            operations.push(operation);
        }
        None => operations.push(operation),
    }
}
