//! Merged outline for overlapping influence zones.
//!
//! Draws only the exposed outer boundary of a set of circles. This is a
//! sampling approximation, not exact arc geometry: covered stretches of a
//! circumference are found by walking it at a roughly constant screen-space
//! step and testing each sample against every other circle. Chord error is
//! bounded by the step size.

use macroquad::prelude::*;

use crate::config;

/// A structure's circular zone of effect, supplied fresh every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfluenceCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl InfluenceCircle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// One stroke of the union boundary.
#[derive(Clone, Debug)]
pub enum OutlinePath {
    /// Untouched circle, drawn unbroken without sampling.
    FullCircle { center: Vec2, radius: f32 },
    /// Exposed run of circumference samples, joined as chords.
    Arc(Vec<Vec2>),
}

// Bounds on samples per circle, so a huge zone cannot stall a frame and a
// tiny one still closes cleanly.
const MIN_ARC_SAMPLES: usize = 12;
const MAX_ARC_SAMPLES: usize = 2048;

/// Plan the outer boundary of the union of `circles`. Pure: no drawing.
pub fn plan_union_outline(circles: &[InfluenceCircle]) -> Vec<OutlinePath> {
    let eps = config::OUTLINE_EPSILON;
    let mut paths = Vec::new();

    'next_circle: for (i, circle) in circles.iter().enumerate() {
        if circle.radius <= eps {
            continue;
        }

        let mut has_partial_overlap = false;
        for (j, other) in circles.iter().enumerate() {
            if j == i {
                continue;
            }
            let d = circle.center.distance(other.center);

            // Fully inside `other` (including concentric): contributes nothing.
            if d + circle.radius <= other.radius - eps {
                continue 'next_circle;
            }
            if (circle.radius - other.radius).abs() + eps < d
                && d < circle.radius + other.radius - eps
            {
                has_partial_overlap = true;
            }
        }

        if !has_partial_overlap {
            paths.push(OutlinePath::FullCircle {
                center: circle.center,
                radius: circle.radius,
            });
            continue;
        }

        sample_exposed_arcs(circles, i, &mut paths);
    }

    paths
}

/// Walk circle `i`'s circumference and emit the runs of samples not covered
/// by any other circle.
fn sample_exposed_arcs(circles: &[InfluenceCircle], i: usize, paths: &mut Vec<OutlinePath>) {
    let circle = &circles[i];
    let eps = config::OUTLINE_EPSILON;

    let sample_count = ((std::f32::consts::TAU * circle.radius / config::OUTLINE_ARC_STEP_PX)
        .ceil() as usize)
        .clamp(MIN_ARC_SAMPLES, MAX_ARC_SAMPLES);
    let step = std::f32::consts::TAU / sample_count as f32;

    let mut points = Vec::with_capacity(sample_count);
    let mut covered = Vec::with_capacity(sample_count);
    for k in 0..sample_count {
        let angle = k as f32 * step;
        let point = circle.center + Vec2::from_angle(angle) * circle.radius;
        points.push(point);
        covered.push(point_covered(circles, i, point, eps));
    }

    if covered.iter().all(|&c| !c) {
        // Overlap exists but no sample landed inside it; close the loop.
        paths.push(OutlinePath::FullCircle {
            center: circle.center,
            radius: circle.radius,
        });
        return;
    }

    // Start scanning at a covered sample so no run is split across the wrap.
    let start = covered.iter().position(|&c| c).unwrap_or(0);
    let mut run: Vec<Vec2> = Vec::new();
    for offset in 0..sample_count {
        let k = (start + offset) % sample_count;
        if covered[k] {
            if run.len() >= 2 {
                paths.push(OutlinePath::Arc(std::mem::take(&mut run)));
            } else {
                run.clear();
            }
        } else {
            run.push(points[k]);
        }
    }
    if run.len() >= 2 {
        paths.push(OutlinePath::Arc(run));
    }
}

/// Is `point` strictly inside any circle other than circle `i`?
fn point_covered(circles: &[InfluenceCircle], i: usize, point: Vec2, eps: f32) -> bool {
    for (j, other) in circles.iter().enumerate() {
        if j == i {
            continue;
        }
        if point.distance_squared(other.center) <= other.radius * other.radius - eps * eps {
            return true;
        }
    }
    false
}

/// Stroke the planned union boundary at fixed low opacity.
pub fn draw_paths(paths: &[OutlinePath], color: Color) {
    let stroke = Color::new(color.r, color.g, color.b, config::OUTLINE_OPACITY);
    for path in paths {
        match path {
            OutlinePath::FullCircle { center, radius } => {
                draw_circle_lines(center.x, center.y, *radius, config::OUTLINE_THICKNESS, stroke);
            }
            OutlinePath::Arc(points) => {
                for pair in points.windows(2) {
                    draw_line(
                        pair[0].x,
                        pair[0].y,
                        pair[1].x,
                        pair[1].y,
                        config::OUTLINE_THICKNESS,
                        stroke,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f32, y: f32, r: f32) -> InfluenceCircle {
        InfluenceCircle::new(vec2(x, y), r)
    }

    fn arc_count(paths: &[OutlinePath]) -> usize {
        paths.iter().filter(|p| matches!(p, OutlinePath::Arc(_))).count()
    }

    #[test]
    fn empty_input_yields_no_paths() {
        assert!(plan_union_outline(&[]).is_empty());
    }

    #[test]
    fn single_circle_is_drawn_full() {
        let paths = plan_union_outline(&[circle(10.0, 20.0, 30.0)]);
        assert_eq!(paths.len(), 1);
        match &paths[0] {
            OutlinePath::FullCircle { center, radius } => {
                assert_eq!(*center, vec2(10.0, 20.0));
                assert_eq!(*radius, 30.0);
            }
            other => panic!("expected full circle, got {other:?}"),
        }
    }

    #[test]
    fn contained_circle_contributes_nothing() {
        // dist(A,B) + r_A = 5 + 10 = 15 <= r_B = 20: A is swallowed.
        let paths = plan_union_outline(&[circle(0.0, 0.0, 10.0), circle(5.0, 0.0, 20.0)]);
        assert_eq!(paths.len(), 1);
        match &paths[0] {
            OutlinePath::FullCircle { radius, .. } => assert_eq!(*radius, 20.0),
            other => panic!("expected only the outer circle, got {other:?}"),
        }
    }

    #[test]
    fn concentric_circle_is_culled() {
        let paths = plan_union_outline(&[circle(0.0, 0.0, 10.0), circle(0.0, 0.0, 25.0)]);
        assert_eq!(paths.len(), 1);
        assert!(matches!(
            paths[0],
            OutlinePath::FullCircle { radius, .. } if radius == 25.0
        ));
    }

    #[test]
    fn disjoint_circles_take_the_fast_path() {
        let paths = plan_union_outline(&[circle(0.0, 0.0, 5.0), circle(100.0, 0.0, 5.0)]);
        assert_eq!(paths.len(), 2);
        assert_eq!(arc_count(&paths), 0);
    }

    #[test]
    fn partial_overlap_lifts_the_pen_on_both_circles() {
        let circles = [circle(0.0, 0.0, 10.0), circle(15.0, 0.0, 10.0)];
        let paths = plan_union_outline(&circles);
        // Both circles go through the sampled path and each loses the arc
        // stretch buried inside the other.
        assert!(arc_count(&paths) >= 2, "paths: {paths:?}");
        assert!(!paths.iter().any(|p| matches!(p, OutlinePath::FullCircle { .. })));
    }

    #[test]
    fn arc_samples_stay_outside_other_circles() {
        let circles = [circle(0.0, 0.0, 40.0), circle(50.0, 0.0, 40.0)];
        let eps = config::OUTLINE_EPSILON;
        for path in plan_union_outline(&circles) {
            if let OutlinePath::Arc(points) = path {
                for p in points {
                    // A kept sample sits on its own circumference, which is
                    // outside the strict-interior test for every circle.
                    for c in &circles {
                        assert!(p.distance_squared(c.center) > c.radius * c.radius - eps * eps);
                    }
                }
            }
        }
    }

    #[test]
    fn degenerate_radius_is_ignored() {
        let paths = plan_union_outline(&[circle(0.0, 0.0, 0.0), circle(30.0, 0.0, 10.0)]);
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn zero_center_distance_does_not_panic() {
        // Identical circles: neither contains the other by the epsilon rule,
        // neither partially overlaps, both emit as full circles.
        let paths = plan_union_outline(&[circle(0.0, 0.0, 10.0), circle(0.0, 0.0, 10.0)]);
        assert_eq!(paths.len(), 2);
        assert_eq!(arc_count(&paths), 0);
    }
}
