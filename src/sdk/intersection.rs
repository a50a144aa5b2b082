//! Planar crossing points between two polylines.
//!
//! Latitude and longitude are treated as Cartesian y/x. That is good enough
//! for city-scale routes and keeps the detector a pure function of its input.

use crate::sdk::routing::GeoPoint;
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionKind {
    /// The segments cross through each other's interior.
    Crossing,
    /// The segments meet at an endpoint of at least one of them.
    Touching,
    /// One end of a stretch where the segments lie on top of each other.
    CollinearOverlap,
}

/// A point shared by segment `segment_a` of the first route and `segment_b`
/// of the second. Segment `i` joins points `i` and `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntersectionPoint {
    pub point: GeoPoint,
    pub segment_a: usize,
    pub segment_b: usize,
    pub kind: IntersectionKind,
}

pub trait IntersectionDetector: Send + Sync {
    fn intersections(&self, a: &[GeoPoint], b: &[GeoPoint]) -> Vec<IntersectionPoint>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarIntersections;

impl IntersectionDetector for PlanarIntersections {
    fn intersections(&self, a: &[GeoPoint], b: &[GeoPoint]) -> Vec<IntersectionPoint> {
        find_intersections(a, b)
    }
}

/// Tests every segment of `a` against every segment of `b`.
///
/// Results are ordered by segment of `a`, then segment of `b`. Nothing is
/// deduplicated: a crossing at a shared vertex shows up once per segment pair
/// that touches it. Fewer than two points on either side means no segments
/// and an empty result.
pub fn find_intersections(a: &[GeoPoint], b: &[GeoPoint]) -> Vec<IntersectionPoint> {
    if a.len() < 2 || b.len() < 2 {
        return Vec::new();
    }

    let lines_b: Vec<Line<f64>> = segments(b).collect();
    let mut found = Vec::new();

    for (segment_a, line_a) in segments(a).enumerate() {
        for (segment_b, line_b) in lines_b.iter().enumerate() {
            let mut push = |coord: Coord<f64>, kind| {
                found.push(IntersectionPoint {
                    point: GeoPoint::from(coord),
                    segment_a,
                    segment_b,
                    kind,
                })
            };
            match line_intersection(line_a, *line_b) {
                Some(LineIntersection::SinglePoint {
                    intersection,
                    is_proper,
                }) => {
                    let kind = if is_proper {
                        IntersectionKind::Crossing
                    } else {
                        IntersectionKind::Touching
                    };
                    push(intersection, kind);
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    push(intersection.start, IntersectionKind::CollinearOverlap);
                    if intersection.end != intersection.start {
                        push(intersection.end, IntersectionKind::CollinearOverlap);
                    }
                }
                None => {}
            }
        }
    }

    found
}

fn segments(points: &[GeoPoint]) -> impl Iterator<Item = Line<f64>> + '_ {
    points
        .windows(2)
        .map(|pair| Line::new(Coord::from(pair[0]), Coord::from(pair[1])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> Vec<GeoPoint> {
        points.iter().map(|&(lat, lon)| GeoPoint::new(lat, lon)).collect()
    }

    fn assert_near(p: GeoPoint, lat: f64, lon: f64) {
        assert!(
            (p.lat - lat).abs() < 1e-12 && (p.lon - lon).abs() < 1e-12,
            "{p:?} is not ({lat}, {lon})"
        );
    }

    #[test]
    fn test_single_crossing() {
        let a = line(&[(0.0, 0.0), (2.0, 2.0)]);
        let b = line(&[(0.0, 2.0), (2.0, 0.0)]);
        let found = find_intersections(&a, &b);
        assert_eq!(found.len(), 1);
        assert_near(found[0].point, 1.0, 1.0);
        assert_eq!(found[0].kind, IntersectionKind::Crossing);
        assert_eq!((found[0].segment_a, found[0].segment_b), (0, 0));
    }

    #[test]
    fn test_parallel_segments_do_not_intersect() {
        let a = line(&[(0.0, 0.0), (2.0, 2.0)]);
        let b = line(&[(0.0, 1.0), (2.0, 3.0)]);
        assert!(find_intersections(&a, &b).is_empty());
    }

    #[test]
    fn test_touching_endpoints() {
        let a = line(&[(0.0, 0.0), (1.0, 1.0)]);
        let b = line(&[(1.0, 1.0), (2.0, 0.0)]);
        let found = find_intersections(&a, &b);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].point, GeoPoint::new(1.0, 1.0));
        assert_eq!(found[0].kind, IntersectionKind::Touching);
    }

    #[test]
    fn test_collinear_overlap_reports_both_ends() {
        let a = line(&[(0.0, 0.0), (0.0, 4.0)]);
        let b = line(&[(0.0, 1.0), (0.0, 6.0)]);
        let found = find_intersections(&a, &b);
        assert_eq!(found.len(), 2);
        assert!(found
            .iter()
            .all(|i| i.kind == IntersectionKind::CollinearOverlap));
        let mut lons: Vec<f64> = found.iter().map(|i| i.point.lon).collect();
        lons.sort_by(f64::total_cmp);
        assert_eq!(lons, vec![1.0, 4.0]);
    }

    #[test]
    fn test_short_routes_have_no_segments() {
        let a = line(&[(0.0, 0.0), (2.0, 2.0)]);
        assert!(find_intersections(&a, &line(&[(1.0, 1.0)])).is_empty());
        assert!(find_intersections(&[], &a).is_empty());
    }

    #[test]
    fn test_order_follows_first_route() {
        // A zigzag crossing a horizontal line three times.
        let a = line(&[(-1.0, 0.0), (1.0, 1.0), (-1.0, 2.0), (1.0, 3.0)]);
        let b = line(&[(0.0, -1.0), (0.0, 4.0)]);
        let found = find_intersections(&a, &b);
        assert_eq!(found.len(), 3);
        let segments: Vec<usize> = found.iter().map(|i| i.segment_a).collect();
        assert_eq!(segments, vec![0, 1, 2]);
        assert_near(found[0].point, 0.0, 0.5);
        assert_near(found[2].point, 0.0, 2.5);
    }

    #[test]
    fn test_shared_vertex_is_not_deduplicated() {
        // b passes through a's middle vertex, which two segments of a touch.
        let a = line(&[(0.0, 0.0), (1.0, 1.0), (0.0, 2.0)]);
        let b = line(&[(1.0, 0.0), (1.0, 2.0)]);
        let found = find_intersections(&a, &b);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|i| i.point == GeoPoint::new(1.0, 1.0)));
    }
}
