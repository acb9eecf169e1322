use rand::Rng;
use tokio::sync::Mutex;

use crate::error::EngineError;

/// Allocator for the short numeric codes participants type to join a game.
///
/// Ids are 1-based and live in `[1, max_id]`. The free set is tracked as a
/// bitmap guarded by a mutex, so concurrent game creations serialize on the
/// check-and-reserve step and can never hand out the same id twice.
#[derive(Debug)]
pub struct PublicIdAllocator {
    max_id: u32,
    inner: Mutex<IdBitmap>,
}

impl PublicIdAllocator {
    /// Create an allocator over the keyspace `[1, max_id]`.
    pub fn new(max_id: u32) -> Self {
        Self {
            max_id,
            inner: Mutex::new(IdBitmap::with_capacity(max_id)),
        }
    }

    /// Reserve a free public id.
    ///
    /// Probing starts at a uniformly random offset and walks linearly from
    /// there, wrapping at `max_id`. The walk is exhaustive, so allocation
    /// fails only when every id in the keyspace is already taken.
    pub async fn allocate(&self) -> Result<u32, EngineError> {
        let mut bitmap = self.inner.lock().await;
        if bitmap.in_use >= self.max_id {
            return Err(EngineError::CapacityExhausted {
                max_id: self.max_id,
            });
        }

        let mut offset = rand::rng().random_range(0..self.max_id);
        loop {
            if !bitmap.is_set(offset) {
                bitmap.set(offset);
                return Ok(offset + 1);
            }
            offset += 1;
            if offset == self.max_id {
                offset = 0;
            }
        }
    }

    /// Return a previously-allocated id to the pool.
    ///
    /// Releasing an id that is out of range or not currently allocated is a
    /// no-op, so game deletion stays idempotent.
    pub async fn release(&self, public_id: u32) {
        if public_id == 0 || public_id > self.max_id {
            return;
        }
        let mut bitmap = self.inner.lock().await;
        bitmap.clear(public_id - 1);
    }

    /// Number of ids currently handed out.
    pub async fn in_use(&self) -> u32 {
        self.inner.lock().await.in_use
    }
}

/// Occupancy bitmap over id offsets, with a running count so the full check
/// is O(1).
#[derive(Debug)]
struct IdBitmap {
    words: Vec<u64>,
    in_use: u32,
}

impl IdBitmap {
    fn with_capacity(max_id: u32) -> Self {
        Self {
            words: vec![0u64; (max_id as usize).div_ceil(64)],
            in_use: 0,
        }
    }

    fn is_set(&self, offset: u32) -> bool {
        self.words[(offset / 64) as usize] & (1u64 << (offset % 64)) != 0
    }

    fn set(&mut self, offset: u32) {
        self.words[(offset / 64) as usize] |= 1u64 << (offset % 64);
        self.in_use += 1;
    }

    fn clear(&mut self, offset: u32) {
        let word = &mut self.words[(offset / 64) as usize];
        let mask = 1u64 << (offset % 64);
        if *word & mask != 0 {
            *word &= !mask;
            self.in_use -= 1;
        }
    }
}
