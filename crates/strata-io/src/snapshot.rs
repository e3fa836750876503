//! Raw per-chunk snapshots.
//!
//! Layout, little-endian: magic `CBCH`, `u16` version, `i32` chunk x,
//! `i32` chunk z, then one byte per voxel in the grid's `(x, y, z)` order.
//! Anything that does not decode cleanly is reported as absent so the
//! caller can regenerate the chunk instead.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use strata_blocks::VoxelType;
use strata_world::{ChunkCoord, VoxelGrid};

pub const SNAPSHOT_MAGIC: [u8; 4] = *b"CBCH";
pub const SNAPSHOT_VERSION: u16 = 1;
const HEADER_LEN: usize = 4 + 2 + 4 + 4;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot i/o: {0}")]
    Io(#[from] io::Error),
}

pub fn write_snapshot<W: Write>(
    mut w: W,
    coord: ChunkCoord,
    grid: &VoxelGrid,
) -> Result<(), SnapshotError> {
    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(&SNAPSHOT_MAGIC);
    header[4..6].copy_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    header[6..10].copy_from_slice(&coord.cx.to_le_bytes());
    header[10..14].copy_from_slice(&coord.cz.to_le_bytes());
    w.write_all(&header)?;
    let payload: Vec<u8> = grid.bytes().collect();
    w.write_all(&payload)?;
    w.flush()?;
    Ok(())
}

/// Reads `buf.len()` bytes, or reports `false` if the stream ends first.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<bool, SnapshotError> {
    match r.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Decodes one snapshot. `Ok(None)` means the data is unusable (wrong magic,
/// unknown version, truncated, or an unknown voxel byte); only genuine I/O
/// failures are errors.
pub fn read_snapshot<R: Read>(mut r: R) -> Result<Option<(ChunkCoord, VoxelGrid)>, SnapshotError> {
    let mut header = [0u8; HEADER_LEN];
    if !read_full(&mut r, &mut header)? {
        log::warn!(target: "snapshot", "truncated header");
        return Ok(None);
    }
    if header[0..4] != SNAPSHOT_MAGIC {
        log::warn!(target: "snapshot", "bad magic {:?}", &header[0..4]);
        return Ok(None);
    }
    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != SNAPSHOT_VERSION {
        log::warn!(target: "snapshot", "unsupported version {}", version);
        return Ok(None);
    }
    let cx = i32::from_le_bytes([header[6], header[7], header[8], header[9]]);
    let cz = i32::from_le_bytes([header[10], header[11], header[12], header[13]]);
    let coord = ChunkCoord::new(cx, cz);

    let mut payload = vec![0u8; VoxelGrid::VOLUME];
    if !read_full(&mut r, &mut payload)? {
        log::warn!(target: "snapshot", "chunk ({}, {}): short payload", cx, cz);
        return Ok(None);
    }
    let mut cells = Vec::with_capacity(VoxelGrid::VOLUME);
    for (i, b) in payload.into_iter().enumerate() {
        match VoxelType::from_u8(b) {
            Some(v) => cells.push(v),
            None => {
                log::warn!(
                    target: "snapshot",
                    "chunk ({}, {}): unknown voxel byte {} at cell {}",
                    cx,
                    cz,
                    b,
                    i
                );
                return Ok(None);
            }
        }
    }
    Ok(VoxelGrid::from_cells(cells).map(|grid| (coord, grid)))
}

/// Directory holding one snapshot file per chunk.
#[derive(Clone, Debug)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the directory if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let dir = Self::new(root);
        fs::create_dir_all(&dir.root)?;
        Ok(dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, coord: ChunkCoord) -> PathBuf {
        self.root.join(format!("c.{}.{}.cbch", coord.cx, coord.cz))
    }

    /// Loads the chunk's snapshot. A missing, unreadable, or mismatched file
    /// is `None`; the reason is logged.
    pub fn load(&self, coord: ChunkCoord) -> Option<VoxelGrid> {
        let path = self.path_for(coord);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!(target: "snapshot", "open {}: {}", path.display(), e);
                return None;
            }
        };
        match read_snapshot(BufReader::new(file)) {
            Ok(Some((stored, grid))) if stored == coord => Some(grid),
            Ok(Some((stored, _))) => {
                log::warn!(
                    target: "snapshot",
                    "{} holds chunk ({}, {}), expected ({}, {})",
                    path.display(),
                    stored.cx,
                    stored.cz,
                    coord.cx,
                    coord.cz
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!(target: "snapshot", "read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Writes through a temporary file and renames it into place, so a
    /// reader never sees a half-written snapshot.
    pub fn save(&self, coord: ChunkCoord, grid: &VoxelGrid) -> Result<(), SnapshotError> {
        let path = self.path_for(coord);
        let tmp = path.with_extension("cbch.tmp");
        {
            let file = File::create(&tmp)?;
            write_snapshot(BufWriter::new(file), coord, grid)?;
        }
        fs::rename(&tmp, &path)?;
        log::trace!(target: "snapshot", "saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_grid() -> VoxelGrid {
        let mut g = VoxelGrid::air();
        g.set(0, 0, 0, VoxelType::Bedrock);
        g.set(15, 383, 15, VoxelType::Glass);
        g.set(3, 70, 9, VoxelType::Water);
        g
    }

    fn encoded(coord: ChunkCoord, grid: &VoxelGrid) -> Vec<u8> {
        let mut out = Vec::new();
        write_snapshot(&mut out, coord, grid).unwrap();
        out
    }

    #[test]
    fn header_layout_is_little_endian() {
        let bytes = encoded(ChunkCoord::new(-2, 258), &VoxelGrid::air());
        assert_eq!(bytes.len(), HEADER_LEN + VoxelGrid::VOLUME);
        assert_eq!(&bytes[0..4], b"CBCH");
        assert_eq!(&bytes[4..6], &[1, 0]);
        assert_eq!(&bytes[6..10], &(-2i32).to_le_bytes());
        assert_eq!(&bytes[10..14], &[2, 1, 0, 0]);
        assert!(bytes[HEADER_LEN..].iter().all(|b| *b == 255));
    }

    #[test]
    fn payload_follows_grid_order() {
        let bytes = encoded(ChunkCoord::new(0, 0), &sample_grid());
        let at = |x, y, z| bytes[HEADER_LEN + VoxelGrid::idx(x, y, z)];
        assert_eq!(at(0, 0, 0), VoxelType::Bedrock.as_u8());
        assert_eq!(at(15, 383, 15), VoxelType::Glass.as_u8());
        assert_eq!(at(3, 70, 9), VoxelType::Water.as_u8());
    }

    #[test]
    fn decodes_what_it_wrote() {
        let grid = sample_grid();
        let bytes = encoded(ChunkCoord::new(7, -9), &grid);
        let (coord, back) = read_snapshot(Cursor::new(bytes)).unwrap().unwrap();
        assert_eq!(coord, ChunkCoord::new(7, -9));
        assert_eq!(back, grid);
    }

    #[test]
    fn corrupt_headers_are_absent() {
        let good = encoded(ChunkCoord::new(1, 1), &sample_grid());

        let mut magic = good.clone();
        magic[0] = b'X';
        assert!(read_snapshot(Cursor::new(magic)).unwrap().is_none());

        let mut version = good.clone();
        version[4] = 2;
        assert!(read_snapshot(Cursor::new(version)).unwrap().is_none());

        assert!(read_snapshot(Cursor::new(&good[..8])).unwrap().is_none());
        assert!(read_snapshot(Cursor::new(Vec::new())).unwrap().is_none());
    }

    #[test]
    fn short_payload_is_absent() {
        let good = encoded(ChunkCoord::new(1, 1), &sample_grid());
        let cut = &good[..good.len() - 1];
        assert!(read_snapshot(Cursor::new(cut)).unwrap().is_none());
    }

    #[test]
    fn unknown_voxel_byte_is_absent() {
        let mut bytes = encoded(ChunkCoord::new(1, 1), &sample_grid());
        bytes[HEADER_LEN + 100] = 42;
        assert!(read_snapshot(Cursor::new(bytes)).unwrap().is_none());
    }

    #[test]
    fn file_names_carry_the_coordinate() {
        let dir = SnapshotDir::new("/tmp/snaps");
        assert_eq!(
            dir.path_for(ChunkCoord::new(-3, 12)),
            Path::new("/tmp/snaps/c.-3.12.cbch")
        );
    }
}
