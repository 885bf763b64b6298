use crate::error::AllocationFailure;

const INITIAL_CAPACITY: usize = 4;

/// Opacity at or below this is gone. Repeated f32 subtraction leaves crumbs
/// like 1e-7 behind, which must not keep a ghost alive for an extra step.
pub const FADED: f32 = 1e-4;

pub fn is_faded(opacity: f32) -> bool {
    opacity <= FADED
}

/// A trail that detached from its column and fades out in place.
#[derive(Clone, Debug, PartialEq)]
pub struct FrozenGhost {
    pub symbols: Vec<char>,
    /// Pixel row the snapshot hangs from; fixed for the ghost's lifetime.
    pub anchor_row_pixel: i32,
    pub opacity: f32,
}

impl FrozenGhost {
    /// Copies `symbols` without panicking when the allocator says no.
    pub fn snapshot(symbols: &[char], anchor_row_pixel: i32) -> Result<Self, AllocationFailure> {
        let mut copy = Vec::new();
        copy.try_reserve_exact(symbols.len())?;
        copy.extend_from_slice(symbols);
        Ok(Self {
            symbols: copy,
            anchor_row_pixel,
            opacity: 1.0,
        })
    }

    pub fn trail_length(&self) -> usize {
        self.symbols.len()
    }
}

/// Per-column ghost storage. Grows by doubling from four slots; removal is
/// swap-remove, so ghost order carries no meaning.
#[derive(Clone, Debug)]
pub struct GhostPool {
    ghosts: Vec<FrozenGhost>,
    limit: usize,
}

impl GhostPool {
    pub fn new(limit: usize) -> Self {
        Self {
            ghosts: Vec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.ghosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ghosts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.ghosts.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrozenGhost> {
        self.ghosts.iter()
    }

    /// On failure the pool is left exactly as it was.
    pub fn push(&mut self, ghost: FrozenGhost) -> Result<(), AllocationFailure> {
        if self.ghosts.len() >= self.limit {
            return Err(AllocationFailure::Limit(self.limit));
        }
        if self.ghosts.len() == self.ghosts.capacity() {
            let grow_by = self.ghosts.capacity().max(INITIAL_CAPACITY);
            self.ghosts.try_reserve_exact(grow_by)?;
        }
        self.ghosts.push(ghost);
        Ok(())
    }

    /// Dims every ghost by `rate` and drops the ones that faded out.
    /// Returns how many were dropped.
    pub fn fade(&mut self, rate: f32) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.ghosts.len() {
            let ghost = &mut self.ghosts[i];
            ghost.opacity = (ghost.opacity - rate).max(0.0);
            if is_faded(ghost.opacity) {
                self.ghosts.swap_remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }
}
