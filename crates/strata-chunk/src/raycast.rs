use strata_geom::Vec3;

/// First solid cell along a ray, the empty cell it was entered from, and
/// the outward normal of the face that was crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayHit {
    pub bx: i32,
    pub by: i32,
    pub bz: i32,
    pub px: i32,
    pub py: i32,
    pub pz: i32,
    pub nx: i32,
    pub ny: i32,
    pub nz: i32,
}

const MAX_STEPS: usize = 512;

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn step_of(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Distance along the ray to the first boundary on one axis.
#[inline]
fn first_boundary(step: i32, frac: f32, inv: f32) -> f32 {
    match step {
        1 => (1.0 - frac) * inv,
        -1 => frac * inv,
        _ => f32::MAX,
    }
}

/// Grid-stepping traversal (Amanatides-Woo). A cell inside `max_dist` that
/// satisfies `is_solid` ends the walk; a hit on the starting cell reports a
/// zero normal.
pub fn raycast_first_hit_with_face<F>(
    origin: Vec3,
    dir: Vec3,
    max_dist: f32,
    mut is_solid: F,
) -> Option<RayHit>
where
    F: FnMut(i32, i32, i32) -> bool,
{
    if dir.length() < 1e-6 {
        return None;
    }
    let d = dir.normalized();

    let (mut vx, mut vy, mut vz) = origin.floor_cell();
    let (sx, sy, sz) = (step_of(d.x), step_of(d.y), step_of(d.z));
    let (ix, iy, iz) = (inv_or_max(d.x), inv_or_max(d.y), inv_or_max(d.z));
    let tdx = if sx == 0 { f32::MAX } else { ix };
    let tdy = if sy == 0 { f32::MAX } else { iy };
    let tdz = if sz == 0 { f32::MAX } else { iz };

    let mut tmx = first_boundary(sx, origin.x - origin.x.floor(), ix);
    let mut tmy = first_boundary(sy, origin.y - origin.y.floor(), iy);
    let mut tmz = first_boundary(sz, origin.z - origin.z.floor(), iz);

    let (mut px, mut py, mut pz) = (vx, vy, vz);
    let mut t = 0.0f32;

    for _ in 0..MAX_STEPS {
        if t > max_dist {
            break;
        }
        if is_solid(vx, vy, vz) {
            // Normal points back toward the cell we came from.
            return Some(RayHit {
                bx: vx,
                by: vy,
                bz: vz,
                px,
                py,
                pz,
                nx: px - vx,
                ny: py - vy,
                nz: pz - vz,
            });
        }
        (px, py, pz) = (vx, vy, vz);
        if tmx < tmy {
            if tmx < tmz {
                vx += sx;
                t = tmx;
                tmx += tdx;
            } else {
                vz += sz;
                t = tmz;
                tmz += tdz;
            }
        } else if tmy < tmz {
            vy += sy;
            t = tmy;
            tmy += tdy;
        } else {
            vz += sz;
            t = tmz;
            tmz += tdz;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_direction_never_hits() {
        let hit = raycast_first_hit_with_face(Vec3::ZERO, Vec3::ZERO, 10.0, |_, _, _| true);
        assert_eq!(hit, None);
    }

    #[test]
    fn straight_down_hits_the_floor_from_above() {
        let hit = raycast_first_hit_with_face(
            Vec3::new(0.5, 10.5, 0.5),
            Vec3::DOWN,
            20.0,
            |_, y, _| y <= 4,
        )
        .unwrap();
        assert_eq!((hit.bx, hit.by, hit.bz), (0, 4, 0));
        assert_eq!((hit.px, hit.py, hit.pz), (0, 5, 0));
        assert_eq!((hit.nx, hit.ny, hit.nz), (0, 1, 0));
    }

    #[test]
    fn range_limits_the_walk() {
        let hit = raycast_first_hit_with_face(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(1.0, 0.0, 0.0),
            3.0,
            |x, _, _| x == 10,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn negative_axis_hits_report_positive_normal() {
        let hit = raycast_first_hit_with_face(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-1.0, 0.0, 0.0),
            10.0,
            |x, _, _| x == -3,
        )
        .unwrap();
        assert_eq!(hit.bx, -3);
        assert_eq!(hit.px, -2);
        assert_eq!((hit.nx, hit.ny, hit.nz), (1, 0, 0));
    }

    #[test]
    fn starting_inside_a_block_hits_immediately() {
        let hit = raycast_first_hit_with_face(
            Vec3::new(2.2, 3.3, 4.4),
            Vec3::new(0.3, -0.2, 0.9),
            5.0,
            |_, _, _| true,
        )
        .unwrap();
        assert_eq!((hit.bx, hit.by, hit.bz), (2, 3, 4));
        assert_eq!((hit.nx, hit.ny, hit.nz), (0, 0, 0));
    }
}
