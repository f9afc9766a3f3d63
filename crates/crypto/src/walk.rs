//! Lazy iteration over consecutive chain elements.
//!
//! A [`ChainWalk`] holds a single element of scratch state and produces the
//! next element only when asked. Walks are finite: they stop after the
//! requested number of elements and never hash past that point.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use shachain_core::ChainElement;
use zeroize::Zeroize;

use crate::digest::ChainDigest;

/// Iterator of `(index, element)` pairs along a hash chain.
pub struct ChainWalk<D: ChainDigest> {
    current: ChainElement,
    /// `current` has been computed but not yet yielded
    primed: bool,
    next_index: u64,
    remaining: u64,
    evaluations: u64,
    _digest: PhantomData<fn() -> D>,
}

impl<D: ChainDigest> ChainWalk<D> {
    /// Walks `e[0] ..= e[elements - 1]` of the chain rooted at `seed`.
    ///
    /// A walk over zero elements is empty and never touches the seed.
    pub fn from_seed(seed: &[u8], elements: u64) -> Self {
        let (current, primed, evaluations) = if elements == 0 {
            (ChainElement::default(), false, 0)
        } else {
            (D::digest(seed), true, 1)
        };
        Self {
            current,
            primed,
            next_index: 0,
            remaining: elements,
            evaluations,
            _digest: PhantomData,
        }
    }

    /// Resumes a chain from a known element at `index`, yielding the next
    /// `steps` elements (`index + 1 ..= index + steps`).
    pub fn from_checkpoint(element: ChainElement, index: u64, steps: u64) -> Self {
        Self {
            current: element,
            primed: false,
            next_index: index.wrapping_add(1),
            remaining: steps,
            evaluations: 0,
            _digest: PhantomData,
        }
    }

    /// Elements still to be produced.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Digest evaluations performed so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Drives the walk to its end and returns the last element produced.
    pub fn finish(mut self) -> Option<ChainElement> {
        let mut last = None;
        while let Some((_, element)) = self.next() {
            last = Some(element);
        }
        last
    }
}

impl<D: ChainDigest> Iterator for ChainWalk<D> {
    type Item = (u64, ChainElement);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        if self.primed {
            self.primed = false;
        } else {
            self.current = D::digest(self.current.as_bytes());
            self.evaluations += 1;
        }

        let index = self.next_index;
        self.next_index = self.next_index.wrapping_add(1);
        self.remaining -= 1;
        Some((index, self.current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<D: ChainDigest> FusedIterator for ChainWalk<D> {}

impl<D: ChainDigest> ChainWalk<D> {
    /// Clears the scratch slot. Elements already yielded are independent
    /// copies and are not affected.
    fn wipe(&mut self) {
        self.current.zeroize();
    }
}

impl<D: ChainDigest> Drop for ChainWalk<D> {
    fn drop(&mut self) {
        self.wipe();
    }
}
