use std::sync::Arc;

use strata_mesh_cpu::Vertex;

use crate::mailbox::MeshMailbox;

/// Renderer side of the pipeline. `upload` replaces the whole buffer pair;
/// `draw` renders whatever was uploaded last.
pub trait MeshSink {
    fn upload(&mut self, vertices: &[Vertex], indices: &[u32]);
    fn draw(&mut self);
}

/// Drives a [`MeshSink`] once per frame from a [`MeshMailbox`].
pub struct Presenter<S: MeshSink> {
    sink: S,
    mailbox: Arc<MeshMailbox>,
    uploads: u64,
    draws: u64,
    index_count: usize,
}

impl<S: MeshSink> Presenter<S> {
    pub fn new(sink: S, mailbox: Arc<MeshMailbox>) -> Self {
        Self {
            sink,
            mailbox,
            uploads: 0,
            draws: 0,
            index_count: 0,
        }
    }

    /// Uploads a freshly published mesh if there is one, then draws.
    /// Returns whether this frame uploaded.
    pub fn frame(&mut self) -> bool {
        let mut uploaded = false;
        if let Some(mesh) = self.mailbox.is_ready().then(|| self.mailbox.take()).flatten() {
            if mesh.is_empty() {
                log::warn!(target: "present", "published mesh is empty; keeping previous buffers");
            } else {
                self.sink.upload(&mesh.vertices, &mesh.indices);
                self.index_count = mesh.indices.len();
                self.uploads += 1;
                uploaded = true;
                log::trace!(
                    target: "present",
                    "uploaded {} vertices, {} indices",
                    mesh.vertices.len(),
                    mesh.indices.len()
                );
            }
        }
        self.sink.draw();
        self.draws += 1;
        uploaded
    }

    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Index count of the buffer currently on the sink.
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
