//! Best-score persistence seam.
//!
//! The engine only needs `best()` and `set_best()`; where the number lives is
//! up to the front end. [`MemoryScoreStore`] keeps it for the process lifetime.

pub trait BestScoreStore {
    fn best(&self) -> u32;
    fn set_best(&mut self, score: u32);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    best: u32,
}

impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryScoreStore {
    fn best(&self) -> u32 {
        self.best
    }

    fn set_best(&mut self, score: u32) {
        self.best = score;
    }
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn best(&self) -> u32 {
        (**self).best()
    }

    fn set_best(&mut self, score: u32) {
        (**self).set_best(score)
    }
}
