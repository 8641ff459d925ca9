use crate::SyntaxKind;

/// Set of kinds as one bit per kind, usable in `const` recovery and
/// first-sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet(u128);

const _: () = assert!((SyntaxKind::TOMBSTONE as u16) < u128::BITS as u16, "SyntaxSet needs a wider word");

impl SyntaxSet {
    pub const EMPTY: Self = Self(0);

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < N {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    pub const fn with(self, kind: SyntaxKind) -> Self {
        Self(self.0 | Self::mask(kind))
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        self.0 & Self::mask(kind) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    const fn mask(kind: SyntaxKind) -> u128 {
        1u128 << kind as u16
    }
}
