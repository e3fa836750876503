#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Top = 0,
    Bottom = 1,
    North = 2,
    South = 3,
    East = 4,
    West = 5,
}

/// Corner offset from the cell's min corner, paired with its UV.
type Corner = ([f32; 3], [f32; 2]);

const TOP: [Corner; 4] = [
    ([0.0, 1.0, 1.0], [0.0, 1.0]),
    ([1.0, 1.0, 1.0], [1.0, 1.0]),
    ([1.0, 1.0, 0.0], [1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0]),
];
const BOTTOM: [Corner; 4] = [
    ([0.0, 0.0, 0.0], [0.0, 0.0]),
    ([1.0, 0.0, 0.0], [1.0, 0.0]),
    ([1.0, 0.0, 1.0], [1.0, 1.0]),
    ([0.0, 0.0, 1.0], [0.0, 1.0]),
];
const NORTH: [Corner; 4] = [
    ([0.0, 0.0, 1.0], [0.0, 0.0]),
    ([1.0, 0.0, 1.0], [1.0, 0.0]),
    ([1.0, 1.0, 1.0], [1.0, 1.0]),
    ([0.0, 1.0, 1.0], [0.0, 1.0]),
];
const SOUTH: [Corner; 4] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0]),
    ([0.0, 0.0, 0.0], [1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 1.0]),
    ([1.0, 1.0, 0.0], [0.0, 1.0]),
];
const EAST: [Corner; 4] = [
    ([1.0, 0.0, 1.0], [0.0, 0.0]),
    ([1.0, 0.0, 0.0], [1.0, 0.0]),
    ([1.0, 1.0, 0.0], [1.0, 1.0]),
    ([1.0, 1.0, 1.0], [0.0, 1.0]),
];
const WEST: [Corner; 4] = [
    ([0.0, 0.0, 0.0], [0.0, 0.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0]),
    ([0.0, 1.0, 1.0], [1.0, 1.0]),
    ([0.0, 1.0, 0.0], [0.0, 1.0]),
];

impl Face {
    /// Emission order; the mesher walks faces in exactly this sequence.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::North,
        Face::South,
        Face::East,
        Face::West,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Top => (0, 1, 0),
            Face::Bottom => (0, -1, 0),
            Face::North => (0, 0, 1),
            Face::South => (0, 0, -1),
            Face::East => (1, 0, 0),
            Face::West => (-1, 0, 0),
        }
    }

    /// Quad corners wound so that `(0,1,2)` and `(0,2,3)` face outward.
    #[inline]
    pub fn corners(self) -> &'static [Corner; 4] {
        match self {
            Face::Top => &TOP,
            Face::Bottom => &BOTTOM,
            Face::North => &NORTH,
            Face::South => &SOUTH,
            Face::East => &EAST,
            Face::West => &WEST,
        }
    }

    #[inline]
    pub fn is_top(self) -> bool {
        matches!(self, Face::Top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for face in Face::ALL {
            let (dx, dy, dz) = face.delta();
            let d = [dx, dy, dz];
            let axis = d.iter().position(|c| *c != 0).unwrap();
            let plane = if d[axis] > 0 { 1.0 } else { 0.0 };
            for (p, _) in face.corners() {
                assert_eq!(p[axis], plane, "{face:?}");
            }
        }
    }

    #[test]
    fn winding_agrees_with_delta() {
        for face in Face::ALL {
            let c = face.corners();
            let n = cross(sub(c[1].0, c[0].0), sub(c[2].0, c[0].0));
            let (dx, dy, dz) = face.delta();
            let dot = n[0] * dx as f32 + n[1] * dy as f32 + n[2] * dz as f32;
            assert!(dot != 0.0, "{face:?} is degenerate");
            // Every face uses the same handedness.
            let top = Face::Top.corners();
            let nt = cross(sub(top[1].0, top[0].0), sub(top[2].0, top[0].0));
            assert_eq!(dot.signum(), nt[1].signum(), "{face:?}");
        }
    }

    #[test]
    fn order_is_stable() {
        let idx: Vec<usize> = Face::ALL.iter().map(|f| f.index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3, 4, 5]);
    }
}
