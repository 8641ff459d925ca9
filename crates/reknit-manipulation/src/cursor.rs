/// Pull cursor over a child sequence with one item of look-behind and one of
/// look-ahead.
///
/// The three visible items live in a ring of three slots, so moving forward
/// only reads one new item from the underlying iterator.
pub struct DualCursor<I: Iterator> {
    iter: I,
    slots: [Option<I::Item>; 3],
    /// Slot of the current item; the next slot holds the peeked item and the
    /// one after it the previous item.
    head: usize,
}

impl<I: Iterator> DualCursor<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        let mut iter = iter.into_iter();
        let peeked = iter.next();
        Self { iter, slots: [None, peeked, None], head: 0 }
    }

    /// `None` until the cursor was advanced once.
    pub fn current(&self) -> Option<&I::Item> {
        self.slots[self.head].as_ref()
    }

    /// `None` until the cursor was advanced twice.
    pub fn previous(&self) -> Option<&I::Item> {
        self.slots[(self.head + 2) % 3].as_ref()
    }

    pub fn peek(&self) -> Option<&I::Item> {
        self.slots[(self.head + 1) % 3].as_ref()
    }

    pub fn done(&self) -> bool {
        self.peek().is_none()
    }

    /// Everything not consumed yet, starting with the peeked item.
    pub fn rest(mut self) -> impl Iterator<Item = I::Item> {
        let peeked = self.slots[(self.head + 1) % 3].take();
        peeked.into_iter().chain(self.iter)
    }
}

impl<I: Iterator> DualCursor<I>
where
    I::Item: Clone,
{
    /// Advances and returns the item that became current, or `None` once the
    /// sequence is exhausted. An exhausted cursor does not move.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<I::Item> {
        if self.done() {
            return None;
        }
        self.head = (self.head + 1) % 3;
        self.slots[(self.head + 1) % 3] = self.iter.next();
        self.slots[self.head].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::DualCursor;

    #[test]
    fn tracks_previous_current_and_peek() {
        let mut cursor = DualCursor::new([1, 2, 3, 4]);
        assert_eq!((cursor.previous(), cursor.current(), cursor.peek()), (None, None, Some(&1)));

        assert_eq!(cursor.next(), Some(1));
        assert_eq!((cursor.previous(), cursor.current(), cursor.peek()), (None, Some(&1), Some(&2)));

        assert_eq!(cursor.next(), Some(2));
        assert_eq!(cursor.next(), Some(3));
        assert_eq!((cursor.previous(), cursor.current(), cursor.peek()), (Some(&2), Some(&3), Some(&4)));

        assert_eq!(cursor.next(), Some(4));
        assert!(cursor.done());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.current(), Some(&4));
    }

    #[test]
    fn exhausted_cursor_stays_put() {
        let mut cursor = DualCursor::new(["a"]);
        assert_eq!(cursor.next(), Some("a"));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.current(), Some(&"a"));
        assert_eq!(cursor.previous(), None);
    }

    #[test]
    fn rest_starts_at_peek() {
        let mut cursor = DualCursor::new(0..5);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.rest().collect::<Vec<_>>(), [2, 3, 4]);

        let empty = DualCursor::new(std::iter::empty::<u8>());
        assert!(empty.done());
        assert_eq!(empty.rest().count(), 0);
    }
}
