use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use strata_mesh_cpu::CombinedMesh;

/// Single-slot handoff between the streaming pass and the presenter. A
/// newer publish replaces an untaken one, so a slow consumer only ever sees
/// the latest complete mesh.
#[derive(Default, Debug)]
pub struct MeshMailbox {
    slot: Mutex<Option<CombinedMesh>>,
    ready: AtomicBool,
    published: AtomicU64,
}

impl MeshMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<CombinedMesh>> {
        // The slot only ever holds a whole mesh, so a poisoned lock still
        // guards consistent data.
        self.slot.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn publish(&self, mesh: CombinedMesh) {
        let mut slot = self.slot();
        *slot = Some(mesh);
        self.ready.store(true, Ordering::Release);
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn take(&self) -> Option<CombinedMesh> {
        let mut slot = self.slot();
        self.ready.store(false, Ordering::Release);
        slot.take()
    }

    /// Number of publishes since creation, taken or not.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
