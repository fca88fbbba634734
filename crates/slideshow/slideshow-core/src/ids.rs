//! Opaque handles exchanged with the host, and per-kind sequences that mint them.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Host-side reference to a page. Handles are allocated densely in append
/// order, so a handle never changes once a page exists.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PageHandle(pub u32);

/// Token identifying one animation request; echoed back by the host on completion.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimationTicket(pub u32);

/// Token identifying one armed autoplay timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u32);

/// Handle types minted by an [`IdSequence`].
pub trait SequentialId: Copy {
    fn from_raw(raw: u32) -> Self;
}

impl SequentialId for PageHandle {
    fn from_raw(raw: u32) -> Self {
        PageHandle(raw)
    }
}

impl SequentialId for AnimationTicket {
    fn from_raw(raw: u32) -> Self {
        AnimationTicket(raw)
    }
}

impl SequentialId for TimerHandle {
    fn from_raw(raw: u32) -> Self {
        TimerHandle(raw)
    }
}

/// Counter for a single handle kind, starting at zero.
#[derive(Debug)]
pub struct IdSequence<T> {
    next: u32,
    kind: PhantomData<T>,
}

impl<T> Default for IdSequence<T> {
    fn default() -> Self {
        Self {
            next: 0,
            kind: PhantomData,
        }
    }
}

impl<T: SequentialId> IdSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_id(&mut self) -> T {
        let id = T::from_raw(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
