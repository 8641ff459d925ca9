use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Typed index into an [`Arena`]. Slots are never freed, so an index stays
/// valid for the arena's whole lifetime.
pub(crate) struct Idx<T>(u32, PhantomData<fn() -> T>);

impl<T> std::fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl<T> std::hash::Hash for Idx<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Idx<T> {}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> Idx<T> {
    fn new(index: u32) -> Self {
        Self(index, PhantomData)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

pub(crate) struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Arena<T> {
    pub(crate) fn alloc(&mut self, value: T) -> Idx<T> {
        let idx = u32::try_from(self.items.len()).expect("arena exceeds u32::MAX slots");
        self.items.push(value);
        Idx::new(idx)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Index<Idx<T>> for Arena<T> {
    type Output = T;

    fn index(&self, index: Idx<T>) -> &Self::Output {
        &self.items[index.index()]
    }
}

impl<T> IndexMut<Idx<T>> for Arena<T> {
    fn index_mut(&mut self, index: Idx<T>) -> &mut Self::Output {
        &mut self.items[index.index()]
    }
}
