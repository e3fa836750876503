//! Streaming scheduler: keeps the chunks around the observer loaded and
//! meshed, and publishes the merged buffer for presentation.
#![forbid(unsafe_code)]

mod mailbox;
mod presenter;

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, bounded, unbounded};
use hashbrown::HashSet;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use strata_chunk::{Chunk, ChunkStore, MeshJob, generate_chunk};
use strata_geom::Vec3;
use strata_io::SnapshotDir;
use strata_mesh_cpu::{ChunkMeshCPU, build_chunk_mesh, merge_meshes};
use strata_world::{ChunkCoord, World};

pub use mailbox::MeshMailbox;
pub use presenter::{MeshSink, Presenter};

#[derive(Clone, Debug)]
pub struct StreamConfig {
    /// Chebyshev radius, in chunks, of the loaded square.
    pub radius: i32,
    /// Meshing workers; 0 picks the available hardware parallelism.
    pub workers: usize,
    pub snapshot_dir: Option<PathBuf>,
    pub snapshot_write: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            radius: 8,
            workers: 0,
            snapshot_dir: None,
            snapshot_write: false,
        }
    }
}

impl StreamConfig {
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

/// Outcome of one completed pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassReport {
    pub center: ChunkCoord,
    pub evicted: usize,
    pub generated: usize,
    pub loaded_from_snapshot: usize,
    pub meshed: usize,
    /// Sizes of the published buffer.
    pub vertices: usize,
    pub indices: usize,
    pub chunks: usize,
    pub elapsed: Duration,
}

/// Clears the in-flight flag however the pass exits.
struct PassGuard<'a>(&'a AtomicBool);

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct StreamingScheduler {
    world: Arc<World>,
    radius: i32,
    workers: usize,
    snapshot_write: bool,
    snapshots: Option<SnapshotDir>,
    store: Arc<RwLock<ChunkStore>>,
    mailbox: Arc<MeshMailbox>,
    pool: ThreadPool,
    in_pass: AtomicBool,
    last_center: Mutex<Option<ChunkCoord>>,
}

impl StreamingScheduler {
    pub fn new(world: World, config: StreamConfig) -> Result<Self, ThreadPoolBuildError> {
        let workers = config.worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("strata-mesh-{i}"))
            .build()?;
        let snapshots = config
            .snapshot_dir
            .as_ref()
            .and_then(|dir| match SnapshotDir::create(dir) {
                Ok(d) => Some(d),
                Err(e) => {
                    log::warn!(
                        target: "stream",
                        "snapshot dir {} unavailable: {}",
                        dir.display(),
                        e
                    );
                    None
                }
            });
        log::info!(
            target: "stream",
            "scheduler: radius {}, {} workers, snapshots {}",
            config.radius,
            workers,
            match &snapshots {
                Some(d) if config.snapshot_write => format!("read/write at {}", d.root().display()),
                Some(d) => format!("read-only at {}", d.root().display()),
                None => "off".to_string(),
            }
        );
        Ok(Self {
            world: Arc::new(world),
            radius: config.radius.max(0),
            workers,
            snapshot_write: config.snapshot_write,
            snapshots,
            store: Arc::new(RwLock::new(ChunkStore::new())),
            mailbox: Arc::new(MeshMailbox::new()),
            pool,
            in_pass: AtomicBool::new(false),
            last_center: Mutex::new(None),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn store(&self) -> Arc<RwLock<ChunkStore>> {
        Arc::clone(&self.store)
    }

    pub fn mailbox(&self) -> Arc<MeshMailbox> {
        Arc::clone(&self.mailbox)
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn loaded_count(&self) -> usize {
        self.store.read().map(|s| s.len()).unwrap_or(0)
    }

    fn last_center(&self) -> Option<ChunkCoord> {
        *self.last_center.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Runs a pass if the observer has entered a different chunk since the
    /// last completed pass. The first call always runs.
    pub fn tick(&self, observer: Vec3) -> Option<PassReport> {
        let center = ChunkCoord::from_world(observer.x, observer.z);
        if self.last_center() == Some(center) {
            return None;
        }
        self.run_pass(center)
    }

    /// Brings the store in line with the square around `center`, meshes
    /// anything new, and publishes the merged result. Returns `None` when
    /// another pass is already running or the store lock is poisoned.
    pub fn run_pass(&self, center: ChunkCoord) -> Option<PassReport> {
        if self
            .in_pass
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!(target: "stream", "pass for ({}, {}) dropped: busy", center.cx, center.cz);
            return None;
        }
        let _guard = PassGuard(&self.in_pass);
        let t0 = Instant::now();

        let desired: HashSet<u64> = center.square(self.radius).map(ChunkCoord::key).collect();
        let (evicted, missing) = {
            let Ok(mut store) = self.store.write() else {
                log::error!(target: "stream", "chunk store lock poisoned; skipping pass");
                return None;
            };
            let evicted = store.retain_keys(&desired);
            let missing: Vec<ChunkCoord> = center
                .square(self.radius)
                .filter(|c| !store.contains(c.key()))
                .collect();
            (evicted, missing)
        };

        let produced: Vec<(Chunk, bool)> = self.pool.install(|| {
            missing
                .par_iter()
                .map(|&coord| self.load_or_generate(coord))
                .collect()
        });
        let loaded_from_snapshot = produced.iter().filter(|(_, from_disk)| *from_disk).count();
        let generated = produced.len() - loaded_from_snapshot;
        {
            let Ok(mut store) = self.store.write() else {
                log::error!(target: "stream", "chunk store lock poisoned; skipping pass");
                return None;
            };
            for (chunk, _) in produced {
                store.insert(chunk);
            }
        }

        let jobs = match self.store.read() {
            Ok(store) => store.unmeshed(),
            Err(_) => {
                log::error!(target: "stream", "chunk store lock poisoned; skipping pass");
                return None;
            }
        };
        let built = self.mesh_all(jobs);
        let meshed = {
            let Ok(mut store) = self.store.write() else {
                log::error!(target: "stream", "chunk store lock poisoned; skipping pass");
                return None;
            };
            built
                .into_iter()
                .filter(|(key, _)| desired.contains(key))
                .map(|(key, mesh)| store.attach_mesh(key, mesh))
                .filter(|attached| *attached)
                .count()
        };

        let (combined, loaded) = {
            let Ok(store) = self.store.read() else {
                log::error!(target: "stream", "chunk store lock poisoned; skipping pass");
                return None;
            };
            let ordered = store.meshes_by_distance(center);
            (merge_meshes(ordered.iter().map(|m| m.as_ref())), store.len())
        };
        let report = PassReport {
            center,
            evicted,
            generated,
            loaded_from_snapshot,
            meshed,
            vertices: combined.vertices.len(),
            indices: combined.indices.len(),
            chunks: combined.chunks,
            elapsed: t0.elapsed(),
        };
        self.mailbox.publish(combined);
        *self.last_center.lock().unwrap_or_else(|p| p.into_inner()) = Some(center);

        log::debug!(
            target: "stream",
            "generated mesh with {} vertices, {} indices, {} chunks, {} loaded",
            report.vertices,
            report.indices,
            report.chunks,
            loaded
        );
        log::trace!(
            target: "stream",
            "pass ({}, {}): -{} +{} ({} from disk), {} meshed in {:?}",
            center.cx,
            center.cz,
            evicted,
            generated,
            loaded_from_snapshot,
            meshed,
            report.elapsed
        );
        Some(report)
    }

    /// Snapshot if one is stored and valid, otherwise a fresh chunk (written
    /// back when enabled). The flag says whether it came from disk.
    fn load_or_generate(&self, coord: ChunkCoord) -> (Chunk, bool) {
        if let Some(grid) = self.snapshots.as_ref().and_then(|d| d.load(coord)) {
            return (Chunk::new(coord, grid), true);
        }
        let chunk = generate_chunk(&self.world, coord);
        if self.snapshot_write {
            if let Some(dir) = &self.snapshots {
                if let Err(e) = dir.save(coord, &chunk.grid) {
                    log::warn!(
                        target: "snapshot",
                        "write chunk ({}, {}) failed: {}",
                        coord.cx,
                        coord.cz,
                        e
                    );
                }
            }
        }
        (chunk, false)
    }

    /// Meshes every job on the pool and waits for all workers. Jobs go
    /// through a channel sized to hold the whole list, so feeding never
    /// blocks a pool thread.
    fn mesh_all(&self, jobs: Vec<MeshJob>) -> Vec<(u64, ChunkMeshCPU)> {
        if jobs.is_empty() {
            return Vec::new();
        }
        let n_workers = self.workers.min(jobs.len()).max(1);
        let (job_tx, job_rx) = bounded::<MeshJob>(jobs.len());
        let (out_tx, out_rx) = unbounded::<(u64, ChunkMeshCPU)>();
        for job in jobs {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);

        let vertices = AtomicUsize::new(0);
        let indices = AtomicUsize::new(0);
        self.pool.scope(|s| {
            for _ in 0..n_workers {
                let rx = job_rx.clone();
                let tx = out_tx.clone();
                let (vertices, indices) = (&vertices, &indices);
                s.spawn(move |_| {
                    while let Ok(job) = rx.recv() {
                        let mesh = build_chunk_mesh(&job.grid, job.coord);
                        vertices.fetch_add(mesh.vertices.len(), Ordering::Relaxed);
                        indices.fetch_add(mesh.indices.len(), Ordering::Relaxed);
                        let _ = tx.send((job.key, mesh));
                    }
                });
            }
        });
        drop(out_tx);
        let built: Vec<(u64, ChunkMeshCPU)> = out_rx.try_iter().collect();
        log::trace!(
            target: "stream",
            "{} workers meshed {} chunks: {} vertices, {} indices",
            n_workers,
            built.len(),
            vertices.load(Ordering::Relaxed),
            indices.load(Ordering::Relaxed)
        );
        built
    }
}

/// Runs `tick` for every observer position received, on a dedicated thread.
/// Positions that pile up during a pass are collapsed to the newest one.
/// The thread exits once every sender is dropped.
pub fn spawn_streaming_thread(
    scheduler: Arc<StreamingScheduler>,
    positions: Receiver<Vec3>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("strata-stream".to_string())
        .spawn(move || {
            while let Ok(first) = positions.recv() {
                let pos = positions.try_iter().last().unwrap_or(first);
                if let Some(report) = scheduler.tick(pos) {
                    log::trace!(
                        target: "stream",
                        "tick at ({:.1}, {:.1}) finished in {:?}",
                        pos.x,
                        pos.z,
                        report.elapsed
                    );
                }
            }
            log::debug!(target: "stream", "position channel closed; streaming thread exiting");
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> StreamingScheduler {
        let config = StreamConfig {
            radius: 1,
            workers: 2,
            ..StreamConfig::default()
        };
        StreamingScheduler::new(World::new(5), config).unwrap()
    }

    #[test]
    fn busy_pass_is_dropped_not_queued() {
        let s = small();
        s.in_pass.store(true, Ordering::Release);
        assert!(s.run_pass(ChunkCoord::new(0, 0)).is_none());
        assert_eq!(s.loaded_count(), 0);
        assert!(!s.mailbox().is_ready());
        s.in_pass.store(false, Ordering::Release);
        assert!(s.run_pass(ChunkCoord::new(0, 0)).is_some());
    }

    #[test]
    fn guard_is_released_after_a_pass() {
        let s = small();
        s.run_pass(ChunkCoord::new(0, 0)).unwrap();
        assert!(!s.in_pass.load(Ordering::Acquire));
    }

    #[test]
    fn worker_count_defaults_to_hardware() {
        let cfg = StreamConfig::default();
        assert!(cfg.worker_count() >= 1);
        let fixed = StreamConfig {
            workers: 3,
            ..StreamConfig::default()
        };
        assert_eq!(fixed.worker_count(), 3);
    }
}
