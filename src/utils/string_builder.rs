/// A helper for building a string in-order based on an original string and a
/// series of deletions and copies applied to it. It is safe to use
/// with UTF-8 strings as all operations are based on character indices. The
/// methods must be called in-order.
pub struct StringBuilder<'a> {
    original: Box<dyn Iterator<Item = char> + 'a>,
    buffer: String,
}

impl std::fmt::Debug for StringBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringBuilder")
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

impl StringBuilder<'_> {
    pub fn new(original: &str) -> StringBuilder<'_> {
        StringBuilder {
            original: Box::new(original.chars()),
            buffer: String::with_capacity(original.len()),
        }
    }

    /// Skip copying `length` characters from the original string to the built
    /// buffer.
    pub fn delete(&mut self, length: usize) {
        if length == 0 {
            return;
        }

        self.original.nth(length - 1);
    }

    /// Copy `length` characters from the original string to the built buffer.
    pub fn retain(&mut self, length: usize) {
        self.buffer.extend(self.original.by_ref().take(length));
    }

    /// Copy every remaining character of the original string.
    pub fn retain_rest(&mut self) { self.buffer.extend(self.original.by_ref()); }

    /// Returns the currently built buffer and clears it to allow consuming
    /// the result incrementally.
    pub fn take(&mut self) -> String { std::mem::take(&mut self.buffer) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_string_builder() {
        let mut builder = StringBuilder::new("aaa bbb ccc");

        builder.delete(3);
        builder.retain(5);
        builder.delete(1);
        builder.retain(2);

        assert_eq!(builder.take(), " bbb cc");

        let mut builder = StringBuilder::new("abcde");

        builder.retain(1);
        builder.delete(3);
        builder.retain_rest();

        assert_eq!(builder.take(), "ae");
    }

    #[test]
    fn test_incremental_take() {
        let mut builder = StringBuilder::new("first|second");

        builder.retain(5);
        assert_eq!(builder.take(), "first");

        builder.delete(1);
        builder.retain_rest();
        assert_eq!(builder.take(), "second");
    }

    #[test]
    fn test_unicode_characters() {
        let mut builder = StringBuilder::new("こんにちは");

        builder.retain(2);
        builder.delete(1);
        builder.retain(2);

        assert_eq!(builder.take(), "こんちは");
    }

    #[test]
    fn test_delete_past_end_is_harmless() {
        let mut builder = StringBuilder::new("Hello");

        builder.delete(10);
        builder.retain_rest();

        assert_eq!(builder.take(), "");
    }
}
