//! # Polygon Clipper
//!
//! Splits a convex polygon against a plane into front/back fragments and
//! classifies coplanar cases. This is the primitive the brush builder
//! drives to carve faces out of half-space intersections.

use glam::DVec3;

use config::constants::Tolerances;

use crate::error::GeomError;
use crate::plane::Plane;
use crate::polygon::Polygon;

// =============================================================================
// CLIP RESULT
// =============================================================================

/// Outcome of clipping a polygon against a plane.
///
/// Exactly one variant is produced per clip; callers consume it with an
/// exhaustive match. The non-`Split` variants carry the input polygon
/// back unmodified.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipResult {
    /// All points on the plane, polygon facing the plane normal's way.
    CoplanarFront(Polygon),
    /// All points on the plane, polygon facing against the plane normal.
    CoplanarBack(Polygon),
    /// Every point on or in front of the plane.
    Front(Polygon),
    /// Every point on or behind the plane.
    Back(Polygon),
    /// Points on both sides; the polygon was cut in two.
    Split { front: Polygon, back: Polygon },
}

// =============================================================================
// CLIPPING
// =============================================================================

/// Clips `polygon` against `plane`.
///
/// Classification uses `tolerances.coplanar_epsilon`; assembled fragments
/// deduplicate points within `tolerances.weld_radius` to avoid zero-area
/// slivers from near-degenerate intersections. A fragment that collapses
/// below three points degrades the result to the whole-polygon
/// classification of the surviving side.
///
/// # Errors
///
/// Returns [`GeomError::NonFinitePoint`] if an intersection produces NaN
/// or infinite coordinates, and [`GeomError::DegeneratePlane`] if a fully
/// coplanar polygon has no derivable facing.
pub fn clip(polygon: Polygon, plane: &Plane, tolerances: &Tolerances) -> Result<ClipResult, GeomError> {
    let eps = tolerances.coplanar_epsilon;
    let dists: Vec<f64> = polygon.points().iter().map(|&p| plane.distance_to(p)).collect();

    let mut front_count = 0usize;
    let mut back_count = 0usize;
    for &d in &dists {
        if d > eps {
            front_count += 1;
        } else if d < -eps {
            back_count += 1;
        }
    }

    if front_count == 0 && back_count == 0 {
        // Coplanar: tie-break on which way the polygon faces
        let facing = polygon.plane().ok_or(GeomError::DegeneratePlane)?;
        return Ok(if facing.normal.dot(plane.normal) >= 0.0 {
            ClipResult::CoplanarFront(polygon)
        } else {
            ClipResult::CoplanarBack(polygon)
        });
    }
    if back_count == 0 {
        return Ok(ClipResult::Front(polygon));
    }
    if front_count == 0 {
        return Ok(ClipResult::Back(polygon));
    }

    // Mixed signs: walk the edge ring, routing each point to the side(s)
    // it belongs to and cutting edges that cross the plane.
    let points = polygon.points();
    let n = points.len();
    let mut front_points: Vec<DVec3> = Vec::with_capacity(n + 2);
    let mut back_points: Vec<DVec3> = Vec::with_capacity(n + 2);

    for i in 0..n {
        let j = (i + 1) % n;
        let (p_i, d_i) = (points[i], dists[i]);
        let (p_j, d_j) = (points[j], dists[j]);

        // On-plane points go to both fragments
        if d_i >= -eps {
            front_points.push(p_i);
        }
        if d_i <= eps {
            back_points.push(p_i);
        }

        if (d_i > eps && d_j < -eps) || (d_i < -eps && d_j > eps) {
            let t = d_i / (d_i - d_j);
            if !t.is_finite() {
                return Err(GeomError::non_finite("plane intersection"));
            }
            let cut = p_i.lerp(p_j, t.clamp(0.0, 1.0));
            if !cut.is_finite() {
                return Err(GeomError::non_finite("plane intersection"));
            }
            front_points.push(cut);
            back_points.push(cut);
        }
    }

    let front_points = dedup_ring(front_points, tolerances.weld_radius);
    let back_points = dedup_ring(back_points, tolerances.weld_radius);

    // A sliver below weld radius is numeric noise, not a fragment
    if back_points.len() < 3 {
        return Ok(ClipResult::Front(polygon));
    }
    if front_points.len() < 3 {
        return Ok(ClipResult::Back(polygon));
    }

    Ok(ClipResult::Split {
        front: Polygon::new(front_points)?,
        back: Polygon::new(back_points)?,
    })
}

/// Drops ring points closer than `radius` to their kept predecessor,
/// including the wrap-around pair.
fn dedup_ring(points: Vec<DVec3>, radius: f64) -> Vec<DVec3> {
    let r2 = radius * radius;
    let mut out: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|&kept| kept.distance_squared(p) <= r2) {
            continue;
        }
        out.push(p);
    }
    while out.len() > 1 && out[0].distance_squared(*out.last().expect("non-empty")) <= r2 {
        out.pop();
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ])
        .unwrap()
    }

    fn tol() -> Tolerances {
        Tolerances::default()
    }

    #[test]
    fn test_clip_all_front() {
        let plane = Plane::new(DVec3::X, -1.0);
        match clip(unit_square(), &plane, &tol()).unwrap() {
            ClipResult::Front(poly) => assert_eq!(poly, unit_square()),
            other => panic!("expected Front, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_all_back() {
        let plane = Plane::new(DVec3::X, 2.0);
        match clip(unit_square(), &plane, &tol()).unwrap() {
            ClipResult::Back(poly) => assert_eq!(poly, unit_square()),
            other => panic!("expected Back, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_coplanar_facing_tie_break() {
        let square = unit_square(); // normal +Z, on z = 0
        match clip(square.clone(), &Plane::new(DVec3::Z, 0.0), &tol()).unwrap() {
            ClipResult::CoplanarFront(_) => {}
            other => panic!("expected CoplanarFront, got {other:?}"),
        }
        match clip(square, &Plane::new(-DVec3::Z, 0.0), &tol()).unwrap() {
            ClipResult::CoplanarBack(_) => {}
            other => panic!("expected CoplanarBack, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_split_square_at_half() {
        // Spec scenario: square against x = 0.5 yields two half-area rects
        let plane = Plane::new(DVec3::X, 0.5);
        match clip(unit_square(), &plane, &tol()).unwrap() {
            ClipResult::Split { front, back } => {
                assert_eq!(front.len(), 4);
                assert_eq!(back.len(), 4);
                assert!((front.area() - 0.5).abs() < 1e-12);
                assert!((back.area() - 0.5).abs() < 1e-12);
                // Every front point at x >= 0.5, every back point at x <= 0.5
                assert!(front.points().iter().all(|p| p.x >= 0.5 - 1e-12));
                assert!(back.points().iter().all(|p| p.x <= 0.5 + 1e-12));
            }
            other => panic!("expected Split, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_split_conserves_vertices_and_area() {
        let plane = Plane::new(DVec3::X, 0.5);
        let original = unit_square();
        let crossings = 2;
        match clip(original.clone(), &plane, &tol()).unwrap() {
            ClipResult::Split { front, back } => {
                assert_eq!(
                    front.len() + back.len() - 2,
                    original.len() + crossings
                );
                assert!((front.area() + back.area() - original.area()).abs() < 1e-12);
            }
            other => panic!("expected Split, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_sliver_degrades_to_whole_side() {
        // The front fragment of this cut is thinner than the weld radius,
        // so the clip degrades to Back with the polygon unmodified.
        let plane = Plane::new(DVec3::X, 0.95);
        match clip(unit_square(), &plane, &tol()).unwrap() {
            ClipResult::Back(poly) => assert_eq!(poly, unit_square()),
            other => panic!("expected Back, got {other:?}"),
        }
    }

    #[test]
    fn test_clip_interpolation_is_clamped_linear() {
        // Triangle with one vertex in front; cut points land exactly on the plane
        let triangle = Polygon::new(vec![
            DVec3::new(-1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(-1.0, 2.0, 0.0),
        ])
        .unwrap();
        let plane = Plane::new(DVec3::X, 0.0);
        match clip(triangle, &plane, &tol()).unwrap() {
            ClipResult::Split { front, back } => {
                let plane_pts = |poly: &Polygon| {
                    poly.points()
                        .iter()
                        .filter(|p| p.x.abs() < 1e-12)
                        .count()
                };
                assert_eq!(plane_pts(&front), 2);
                assert_eq!(plane_pts(&back), 2);
            }
            other => panic!("expected Split, got {other:?}"),
        }
    }

    #[test]
    fn test_dedup_ring_collapses_wraparound() {
        let ring = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.01, 0.0, 0.0), // within weld radius of the first
        ];
        let out = dedup_ring(ring, 0.125);
        assert_eq!(out.len(), 3);
    }
}
