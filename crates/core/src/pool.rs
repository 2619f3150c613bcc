//! Fixed-capacity arena of reusable 2D points.
//!
//! Blades allocate their control points and cached curve points here instead
//! of heap-allocating every frame. Slots are indexed by opaque
//! [`PointHandle`]s handed out from a free list; `point()` copies the value
//! out, so no caller ever holds a reference into the arena.
//!
//! Discipline is strict get/release pairing: every cache replacement and
//! every blade teardown must release exactly the handles it acquired.
//! Exhaustion is not an error: the arena grows by one slot per allocation
//! past capacity and counts the overflow, so rendering degrades instead of
//! failing.

use glam::DVec2;
use serde::Serialize;

/// Opaque index into a [`VectorPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointHandle(u32);

/// Occupancy counters for a [`VectorPool`].
///
/// `available + in_use == total` holds at every observation point; `total`
/// includes slots added by fallback growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub total: usize,
    pub available: usize,
    pub in_use: usize,
    pub fallback_allocations: u64,
}

/// Reusable allocator for 2D points.
#[derive(Debug, Clone)]
pub struct VectorPool {
    slots: Vec<DVec2>,
    free: Vec<u32>,
    fallback_allocations: u64,
}

impl VectorPool {
    /// Creates a pool with `capacity` pre-allocated slots, all free.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![DVec2::ZERO; capacity],
            // Pop order is irrelevant; reverse just hands out low indices first.
            free: (0..capacity as u32).rev().collect(),
            fallback_allocations: 0,
        }
    }

    /// Acquires a slot holding `(x, y)`.
    ///
    /// When the free list is empty the arena grows by one slot and the
    /// fallback counter increments; the returned handle behaves like any
    /// other and may be released normally.
    pub fn get(&mut self, x: f64, y: f64) -> PointHandle {
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = DVec2::new(x, y);
                PointHandle(index)
            }
            None => {
                self.fallback_allocations += 1;
                if self.fallback_allocations == 1 {
                    log::warn!(
                        "vector pool exhausted at {} slots; growing past capacity",
                        self.slots.len()
                    );
                }
                let index = self.slots.len() as u32;
                self.slots.push(DVec2::new(x, y));
                PointHandle(index)
            }
        }
    }

    /// Returns a slot to the free list.
    ///
    /// Releasing a handle twice is a logic error (checked in debug builds).
    pub fn release(&mut self, handle: PointHandle) {
        debug_assert!(
            !self.free.contains(&handle.0),
            "double release of pool handle {}",
            handle.0
        );
        self.free.push(handle.0);
    }

    /// Returns every handle in `handles` to the free list.
    pub fn release_all<I>(&mut self, handles: I)
    where
        I: IntoIterator<Item = PointHandle>,
    {
        for handle in handles {
            self.release(handle);
        }
    }

    /// Copies the point value out of a slot.
    pub fn point(&self, handle: PointHandle) -> DVec2 {
        self.slots[handle.0 as usize]
    }

    /// Current occupancy counters.
    pub fn stats(&self) -> PoolStats {
        let total = self.slots.len();
        let available = self.free.len();
        PoolStats {
            total,
            available,
            in_use: total - available,
            fallback_allocations: self.fallback_allocations,
        }
    }
}
