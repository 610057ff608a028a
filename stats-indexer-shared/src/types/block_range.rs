use std::fmt;

/// Inclusive range of block heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRange {
    pub from: u64,
    pub to: u64,
}

impl BlockRange {
    pub fn new(from: u64, to: u64) -> Self {
        Self { from, to }
    }

    pub fn len(&self) -> u64 {
        self.to.saturating_sub(self.from) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }

    /// Splits the range into consecutive sub-ranges of at most `size` blocks.
    pub fn chunks(self, size: u64) -> impl Iterator<Item = BlockRange> {
        let to = self.to;
        let size = size.max(1);
        let mut next = self.from;
        std::iter::from_fn(move || {
            if next > to {
                return None;
            }
            let chunk_to = next.saturating_add(size - 1).min(to);
            let chunk = BlockRange::new(next, chunk_to);
            next = chunk_to + 1;
            Some(chunk)
        })
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}
