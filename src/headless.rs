use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use strata_geom::Vec3;
use strata_mesh_cpu::Vertex;
use strata_runtime::{MeshSink, Presenter, StreamingScheduler, spawn_streaming_thread};
use strata_world::{ChunkCoord, World};

use crate::config::AppConfig;
use crate::observer::{MoveInput, Observer};

const FRAME_DT: f32 = 1.0 / 60.0;
const SUMMARY_EVERY: u64 = 60;

/// Renderer stand-in that only records what it was given.
#[derive(Default, Debug)]
pub struct NullSink {
    pub uploads: u64,
    pub draws: u64,
    pub vertices: usize,
    pub indices: usize,
}

impl MeshSink for NullSink {
    fn upload(&mut self, vertices: &[Vertex], indices: &[u32]) {
        self.uploads += 1;
        self.vertices = vertices.len();
        self.indices = indices.len();
    }

    fn draw(&mut self) {
        self.draws += 1;
    }
}

/// Square loop walked counter-clockwise from the spawn point.
#[derive(Clone, Copy, Debug)]
pub struct ScriptedPath {
    side: f32,
}

impl ScriptedPath {
    pub fn new(length: f32) -> Self {
        Self {
            side: (length / 4.0).max(1.0),
        }
    }

    /// Unit heading after covering `distance` along the loop.
    pub fn heading(&self, distance: f32) -> Vec3 {
        let leg = (distance / self.side).floor().rem_euclid(4.0) as u8;
        match leg {
            0 => Vec3::new(1.0, 0.0, 0.0),
            1 => Vec3::new(0.0, 0.0, 1.0),
            2 => Vec3::new(-1.0, 0.0, 0.0),
            _ => Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HeadlessOptions {
    pub frames: u64,
    pub path_length: f32,
}

#[derive(Debug)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub passes: u64,
    pub uploads: u64,
    pub draws: u64,
    pub loaded: usize,
    pub final_position: Vec3,
}

/// Streams terrain around a scripted observer without a window. Physics
/// only runs once the observer's own chunk is resident, so the body does
/// not fall through terrain that has not been generated yet.
pub fn run(cfg: &AppConfig, world: World, opts: HeadlessOptions) -> Result<HeadlessSummary, Box<dyn Error>> {
    let scheduler = Arc::new(StreamingScheduler::new(world, cfg.stream_config())?);
    let store = scheduler.store();
    let mut presenter = Presenter::new(NullSink::default(), scheduler.mailbox());
    let (pos_tx, pos_rx) = crossbeam_channel::unbounded::<Vec3>();
    let streamer = spawn_streaming_thread(Arc::clone(&scheduler), pos_rx)?;

    let mut observer = Observer::new(cfg.spawn(), cfg.observer.fly);
    observer.speed = cfg.observer.speed;
    let path = ScriptedPath::new(opts.path_length);
    let t0 = Instant::now();

    for frame in 0..opts.frames {
        let input = MoveInput {
            wish: path.heading(frame as f32 * observer.speed * FRAME_DT),
            ..MoveInput::default()
        };
        match store.read() {
            Ok(s) => {
                let here = ChunkCoord::from_world(observer.pos.x, observer.pos.z);
                if observer.fly || s.get_coord(here).is_some() {
                    observer.step(&s, &input, FRAME_DT);
                }
            }
            Err(_) => log::error!(target: "observer", "chunk store lock poisoned; holding position"),
        }
        if pos_tx.send(observer.pos).is_err() {
            log::warn!(target: "headless", "streaming thread gone; stopping early");
            break;
        }
        presenter.frame();

        if frame % SUMMARY_EVERY == 0 {
            let eye = observer.eye_position();
            let below = store
                .read()
                .ok()
                .and_then(|s| s.raycast(eye, Vec3::DOWN, 64.0))
                .map(|hit| hit.by);
            log::info!(
                target: "headless",
                "frame {}: pos ({:.1}, {:.1}, {:.1}) ground {:?}, loaded {}, uploads {}",
                frame,
                observer.pos.x,
                observer.pos.y,
                observer.pos.z,
                below,
                scheduler.loaded_count(),
                presenter.uploads()
            );
        }
    }

    drop(pos_tx);
    if streamer.join().is_err() {
        log::error!(target: "headless", "streaming thread panicked");
    }
    // Pick up whatever the last pass published.
    presenter.frame();

    let sink = presenter.sink();
    let summary = HeadlessSummary {
        frames: opts.frames,
        passes: scheduler.mailbox().published(),
        uploads: sink.uploads,
        draws: sink.draws,
        loaded: scheduler.loaded_count(),
        final_position: observer.pos,
    };
    log::info!(
        target: "headless",
        "done in {:?}: {} passes, {} uploads ({} vertices, {} indices last), {} draws, {} chunks loaded",
        t0.elapsed(),
        summary.passes,
        summary.uploads,
        sink.vertices,
        sink.indices,
        summary.draws,
        summary.loaded
    );
    Ok(summary)
}
