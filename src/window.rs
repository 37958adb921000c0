//! Circular four-cursor sample window
//!
//! The window is a fixed-capacity ring holding the most recent `n` samples.
//! Four cursors index into it: the write cursor and three read cursors placed
//! at golden-ratio offsets. The offsets are fixed at construction; all four
//! cursors advance together each step, each wrapping independently.
//!
//! Cursor positions are 1-based (reset to 1 past `n`), matching the positions
//! reported in the diagnostic output columns.

use num_traits::Float;

/// Golden-ratio conjugate, (sqrt(5) - 1) / 2
pub(crate) const GOLDEN_CONJUGATE: f64 = 0.618_033_988_749_894_9;

/// Fixed-capacity circular buffer with four corner cursors
#[derive(Clone)]
pub struct CornerWindow<F> {
    slots: Box<[F]>,
    cursors: [usize; 4],
}

impl<F> std::fmt::Debug for CornerWindow<F>
where
    F: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CornerWindow")
            .field("len", &self.slots.len())
            .field("cursors", &self.cursors)
            .finish()
    }
}

impl<F: Float> CornerWindow<F> {
    /// Create a zero-filled window of capacity `len`
    ///
    /// Initial cursor positions are `[1, floor(g*n), floor((1-g)*n), n]`
    /// where `g` is the golden-ratio conjugate.
    pub fn new(len: usize) -> Self {
        debug_assert!(len >= 4, "corner cursors need a window of at least 4");
        let corner_b = (GOLDEN_CONJUGATE * len as f64).floor() as usize;
        let corner_c = ((1.0 - GOLDEN_CONJUGATE) * len as f64).floor() as usize;
        Self {
            slots: vec![F::zero(); len].into_boxed_slice(),
            cursors: [1, corner_b, corner_c, len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current 1-based cursor positions, write cursor first
    pub fn cursors(&self) -> [usize; 4] {
        self.cursors
    }

    /// Store `value` at the write cursor
    pub fn write(&mut self, value: F) {
        self.slots[self.cursors[0] - 1] = value;
    }

    /// The sample under each of the four cursors
    pub fn corner_values(&self) -> [F; 4] {
        [
            self.slots[self.cursors[0] - 1],
            self.slots[self.cursors[1] - 1],
            self.slots[self.cursors[2] - 1],
            self.slots[self.cursors[3] - 1],
        ]
    }

    /// Advance all four cursors one position, wrapping past `n` back to 1
    pub fn advance(&mut self) {
        let len = self.slots.len();
        for cursor in &mut self.cursors {
            *cursor += 1;
            if *cursor > len {
                *cursor = 1;
            }
        }
    }
}
