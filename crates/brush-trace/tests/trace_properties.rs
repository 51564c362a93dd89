use approx::assert_relative_eq;
use brush_trace::shapes::{cube_quads, ramp_quads, RampRise};
use brush_trace::bsp::{BspNode, FnVisitor};
use brush_trace::{
    Brush, BspTree, BuildConfig, FirstPlane, LeastStraddling, PlaneSelector, TraceBox, TraceError,
    TraceResult, DIST_EPSILON,
};
use nalgebra::{Point3, Vector3};

fn cube(min: [f32; 3], max: [f32; 3]) -> Brush {
    Brush::from_quads(&cube_quads(Point3::from(min), Point3::from(max)))
}

fn p(x: f32, y: f32, z: f32) -> Point3<f32> {
    Point3::new(x, y, z)
}

fn single_cube_tree() -> BspTree {
    BspTree::from_brushes(vec![cube([0.0; 3], [10.0; 3])])
}

/// A few scattered cubes with a corridor along y at x in 4..6.
fn scattered() -> Vec<Brush> {
    vec![
        cube([4.0, 2.0, 0.0], [6.0, 3.0, 1.0]),
        cube([4.0, 6.0, 0.0], [6.0, 7.0, 1.0]),
        cube([4.0, 10.0, 0.0], [6.0, 11.0, 1.0]),
        cube([20.0, 2.0, 0.0], [21.0, 3.0, 1.0]),
        cube([-8.0, 4.0, 0.0], [-6.0, 5.0, 1.0]),
        cube([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
        cube([7.0, 0.0, 0.0], [8.0, 1.0, 1.0]),
    ]
}

fn point_trace(tree: &BspTree, start: Point3<f32>, end: Point3<f32>) -> TraceResult {
    tree.trace(start, end, &TraceBox::point())
}

#[test]
fn empty_tree_lets_everything_through() {
    let tree = BspTree::from_brushes(vec![]);
    let start = p(-3.0, 2.0, 7.0);
    let end = p(40.0, -12.0, 1.5);

    let result = tree
        .box_trace(start, end, p(-16.0, -24.0, -16.0), p(16.0, 32.0, 16.0))
        .unwrap();

    assert_eq!(result.time_fraction, 1.0);
    assert_eq!(result.end_pos, end);
    assert!(result.starts_out);
    assert!(!result.all_solid);
    assert!(result.plane.is_none());
    assert!(result.brush.is_none());
}

#[test]
fn point_trace_stops_short_of_face() {
    let tree = single_cube_tree();
    let start = p(5.0, -5.0, 5.0);
    let end = p(5.0, 5.0, 5.0);

    let result = tree.box_trace(start, end, Point3::origin(), Point3::origin()).unwrap();

    assert_relative_eq!(result.time_fraction, (5.0 - DIST_EPSILON) / 10.0);
    assert_eq!(result.plane.normal(), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(result.brush, Some(0));
    assert!(result.starts_out);
    assert!(!result.all_solid);
    assert_relative_eq!(result.end_pos, p(5.0, -DIST_EPSILON, 5.0), epsilon = 1e-5);
}

#[test]
fn box_inside_brush_is_all_solid() {
    let tree = single_cube_tree();
    let result = tree
        .box_trace(p(5.0, 5.0, 5.0), p(6.0, 6.0, 6.0), p(-1.0, -1.0, -1.0), p(1.0, 1.0, 1.0))
        .unwrap();

    assert!(result.all_solid);
    assert!(!result.starts_out);
    assert_eq!(result.time_fraction, 1.0);
}

#[test]
fn leaving_a_brush_is_not_all_solid() {
    let tree = single_cube_tree();
    let result = point_trace(&tree, p(5.0, 5.0, 5.0), p(5.0, 25.0, 5.0));

    assert!(!result.starts_out);
    assert!(!result.all_solid);
}

#[test]
fn nearest_hit_wins_regardless_of_order_and_selector() {
    let start = p(5.0, -5.0, 0.5);
    let end = p(5.0, 20.0, 0.5);
    let expected = (7.0 - DIST_EPSILON) / 25.0;
    let first_hit = cube([4.0, 2.0, 0.0], [6.0, 3.0, 1.0]);

    let mut orders = vec![scattered()];
    let mut reversed = scattered();
    reversed.reverse();
    orders.push(reversed);
    let mut rotated = scattered();
    rotated.rotate_left(3);
    orders.push(rotated);

    let configs = [
        BuildConfig::default(),
        BuildConfig::default().with_max_leaf_brushes(3),
        BuildConfig::default().with_max_depth(2),
    ];

    fn check<S: PlaneSelector>(
        brushes: Vec<Brush>,
        selector: &S,
        config: &BuildConfig,
        start: Point3<f32>,
        end: Point3<f32>,
    ) -> (TraceResult, Brush) {
        let tree = BspTree::build(brushes, selector, config);
        let result = tree.trace(start, end, &TraceBox::point());
        let brush = result.brush.and_then(|id| tree.brush(id)).cloned().unwrap();
        (result, brush)
    }

    for brushes in orders {
        for config in &configs {
            for (result, brush) in [
                check(brushes.clone(), &FirstPlane, config, start, end),
                check(brushes.clone(), &LeastStraddling::default(), config, start, end),
            ] {
                assert_relative_eq!(result.time_fraction, expected);
                assert_eq!(result.plane.normal(), Vector3::new(0.0, -1.0, 0.0));
                assert_eq!(brush, first_hit);
            }
        }
    }
}

#[test]
fn ending_on_a_face_never_penetrates() {
    let tree = single_cube_tree();
    let brush = &tree.brushes()[0];
    let start = p(5.0, -5.0, 5.0);

    for delta in [0.0_f32, 1e-4, -1e-4, 1e-3, -1e-3, 0.01, -0.01] {
        let end = p(5.0, delta, 5.0);
        let result = point_trace(&tree, start, end);

        assert!(!brush.contains_point(result.end_pos), "delta {delta}: {:?}", result.end_pos);
        let gap = -result.end_pos.y;
        assert!(gap >= 0.0, "delta {delta}");
        assert!(gap <= DIST_EPSILON + delta.abs() + 1e-5, "delta {delta}: gap {gap}");
    }
}

#[test]
fn box_ending_on_a_face_never_penetrates() {
    let tree = single_cube_tree();
    let trace_box = TraceBox::centered(Vector3::new(1.0, 1.0, 1.0)).unwrap();
    let start = p(5.0, -10.0, 5.0);

    for delta in [0.0_f32, 1e-4, -1e-4, 1e-3, -1e-3] {
        let end = p(5.0, -1.0 + delta, 5.0);
        let result = tree.trace(start, end, &trace_box);

        let top = result.end_pos.y + 1.0;
        assert!(top <= 0.0, "delta {delta}: box top at {top}");
        assert!(-top <= DIST_EPSILON + delta.abs() + 1e-5, "delta {delta}: box top at {top}");
    }
}

#[test]
fn repeated_traces_are_bit_identical() {
    let tree = BspTree::from_brushes(scattered());
    let trace_box = TraceBox::new(p(-0.5, -0.5, -0.5), p(0.5, 1.5, 0.5)).unwrap();
    let start = p(4.3, -3.0, 0.2);
    let end = p(7.1, 14.0, 0.9);

    let first = tree.trace(start, end, &trace_box);
    for _ in 0..10 {
        let again = tree.trace(start, end, &trace_box);
        assert_eq!(again.time_fraction.to_bits(), first.time_fraction.to_bits());
        for axis in 0..3 {
            assert_eq!(again.end_pos[axis].to_bits(), first.end_pos[axis].to_bits());
        }
        assert_eq!(again.plane, first.plane);
        assert_eq!(again.brush, first.brush);
        assert_eq!(again.starts_out, first.starts_out);
        assert_eq!(again.all_solid, first.all_solid);
    }
}

#[test]
fn symmetric_box_hits_earlier_than_a_point() {
    let tree = single_cube_tree();
    let result = tree
        .box_trace(p(5.0, -5.0, 5.0), p(5.0, 5.0, 5.0), p(-1.0, -1.0, -1.0), p(1.0, 1.0, 1.0))
        .unwrap();

    assert_relative_eq!(result.time_fraction, (4.0 - DIST_EPSILON) / 10.0);
    assert_eq!(result.plane.normal(), Vector3::new(0.0, -1.0, 0.0));
}

#[test]
fn asymmetric_box_uses_the_leading_side() {
    let tree = single_cube_tree();
    let mins = p(-1.0, -1.0, -1.0);
    let maxs = p(1.0, 3.0, 1.0);

    // Moving +y leads with maxs.y = 3.
    let up = tree.box_trace(p(5.0, -5.0, 5.0), p(5.0, 5.0, 5.0), mins, maxs).unwrap();
    assert_relative_eq!(up.time_fraction, (2.0 - DIST_EPSILON) / 10.0);

    // Moving -y leads with mins.y = -1.
    let down = tree.box_trace(p(5.0, 15.0, 5.0), p(5.0, 5.0, 5.0), mins, maxs).unwrap();
    assert_relative_eq!(down.time_fraction, (4.0 - DIST_EPSILON) / 10.0);
    assert_eq!(down.plane.normal(), Vector3::new(0.0, 1.0, 0.0));
}

#[test]
fn box_reaches_across_split_planes() {
    let tree = BspTree::from_brushes(vec![
        cube([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
        cube([5.0, 0.0, 0.0], [6.0, 1.0, 1.0]),
    ]);
    let trace_box = TraceBox::centered(Vector3::new(1.0, 1.0, 1.0)).unwrap();

    // Centre outside both cubes in x, box overlapping the near one.
    let result = tree.trace(p(1.5, -5.0, 0.5), p(1.5, 5.0, 0.5), &trace_box);
    assert_eq!(result.brush, Some(0));
    assert_relative_eq!(result.time_fraction, (4.0 - DIST_EPSILON) / 10.0);

    let result = tree.trace(p(4.5, -5.0, 0.5), p(4.5, 5.0, 0.5), &trace_box);
    assert_eq!(result.brush, Some(1));
    assert_relative_eq!(result.time_fraction, (4.0 - DIST_EPSILON) / 10.0);

    // Slides through the gap between them.
    let thin = TraceBox::centered(Vector3::new(0.5, 0.5, 0.5)).unwrap();
    let result = tree.trace(p(3.0, -5.0, 0.5), p(3.0, 5.0, 0.5), &thin);
    assert!(!result.hit());
    assert_eq!(result.end_pos, p(3.0, 5.0, 0.5));
}

#[test]
fn inverted_bounds_are_rejected() {
    let tree = single_cube_tree();
    let err = tree
        .box_trace(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, -1.0, -1.0), p(-1.0, 1.0, 1.0))
        .unwrap_err();

    assert_eq!(
        err,
        TraceError::InvertedBounds {
            axis: 0,
            min: 1.0,
            max: -1.0
        }
    );
}

#[test]
fn point_lands_on_ramp_slope() {
    let ramp = Brush::from_quads(&ramp_quads(Point3::origin(), p(10.0, 5.0, 10.0), RampRise::PosZ));
    let tree = BspTree::from_brushes(vec![ramp]);
    let brush = &tree.brushes()[0];

    let result = point_trace(&tree, p(5.0, 10.0, 5.0), p(5.0, -1.0, 5.0));

    assert!(result.hit());
    assert!(result.plane.normal().y > 0.0);
    assert!(result.plane.normal().z < 0.0);
    // Slope height at z = 5 is 2.5; the stop sits epsilon off the face along its normal.
    assert!(result.end_pos.y > 2.5 && result.end_pos.y < 2.55, "{:?}", result.end_pos);
    assert!(!brush.contains_point(result.end_pos));
}

#[test]
fn end_position_interpolates_fraction() {
    let tree = BspTree::from_brushes(scattered());
    let boxes = [
        TraceBox::point(),
        TraceBox::centered(Vector3::new(0.25, 0.25, 0.25)).unwrap(),
        TraceBox::new(p(-0.5, 0.0, -0.5), p(0.5, 1.5, 0.5)).unwrap(),
    ];

    for trace_box in &boxes {
        for i in 0..8 {
            for j in 0..8 {
                let start = p(-10.0 + i as f32 * 4.0, -4.0, 0.5);
                let end = p(-10.0 + j as f32 * 4.0, 14.0, 0.5 + j as f32 * 0.1);
                let result = tree.trace(start, end, trace_box);

                assert!((0.0..=1.0).contains(&result.time_fraction));
                if result.time_fraction < 1.0 {
                    assert_eq!(result.end_pos, start + (end - start) * result.time_fraction);
                } else {
                    assert_eq!(result.end_pos, end);
                }
            }
        }
    }
}

#[test]
fn batch_agrees_with_single_traces() {
    let tree = BspTree::from_brushes(scattered());
    let trace_box = TraceBox::centered(Vector3::new(0.5, 0.5, 0.5)).unwrap();
    let segments: Vec<(Point3<f32>, Point3<f32>)> = (0..16)
        .map(|i| (p(i as f32 - 8.0, -5.0, 0.5), p(5.0, 15.0, 0.5)))
        .collect();

    let batch = tree.trace_batch(&segments, &trace_box);
    for (result, &(start, end)) in batch.iter().zip(&segments) {
        assert_eq!(*result, tree.trace(start, end, &trace_box));
    }
}

#[test]
fn trace_along_a_split_face_still_hits_it() {
    let floor = || cube([0.0, -1.0, 0.0], [10.0, 0.0, 10.0]);
    let alone = BspTree::from_brushes(vec![floor()]);
    let tree = BspTree::from_brushes(vec![floor(), cube([0.0, 5.0, 0.0], [10.0, 6.0, 10.0])]);
    assert!(tree.root().plane().is_some());

    // A point sliding on the floor's top face.
    let start = p(-5.0, 0.0, 5.0);
    let end = p(5.0, 0.0, 5.0);
    let result = point_trace(&tree, start, end);
    assert_eq!(result, point_trace(&alone, start, end));
    assert_relative_eq!(result.time_fraction, 0.496875);
    assert_eq!(result.brush, Some(0));

    // A box resting on it.
    let trace_box = TraceBox::centered(Vector3::new(1.0, 1.0, 1.0)).unwrap();
    let start = p(-5.0, 1.0, 5.0);
    let end = p(5.0, 1.0, 5.0);
    let result = tree.trace(start, end, &trace_box);
    assert_eq!(result, alone.trace(start, end, &trace_box));
    assert_relative_eq!(result.time_fraction, 0.396875);
    assert_eq!(result.brush, Some(0));
}

#[test]
fn boxes_cross_oblique_splits_like_a_flat_list() {
    let brushes = || {
        vec![
            Brush::from_quads(&ramp_quads(Point3::origin(), p(10.0, 5.0, 10.0), RampRise::PosZ)),
            cube([0.0, 8.0, -1.0], [10.0, 9.0, 3.0]),
            cube([-20.0, -1.0, -20.0], [30.0, 0.0, 30.0]),
        ]
    };
    let flat = BspTree::build(
        brushes(),
        &FirstPlane,
        &BuildConfig::default().with_max_leaf_brushes(usize::MAX),
    );
    assert_eq!(flat.node_count(), 1);

    let first = BspTree::build(brushes(), &FirstPlane, &BuildConfig::default());
    let least = BspTree::from_brushes(brushes());
    let root_plane = first.root().plane().unwrap();
    assert!(root_plane.axis().is_none(), "{root_plane:?}");

    let mut oblique = 0;
    let mut count_oblique = FnVisitor::new(|node: &BspNode, _| {
        if node.plane().is_some_and(|plane| plane.axis().is_none()) {
            oblique += 1;
        }
    });
    first.walk(&mut count_oblique);
    assert!(oblique >= 1);

    let boxes = [
        TraceBox::centered(Vector3::new(0.5, 0.5, 0.5)).unwrap(),
        TraceBox::new(p(-1.0, 0.0, -1.0), p(1.0, 2.0, 1.0)).unwrap(),
    ];
    let segments = [
        // Dropping onto the slope.
        (p(5.0, 7.0, 5.0), p(5.0, 1.0, 5.0)),
        // Running into the slope from the low end.
        (p(5.0, 2.0, -5.0), p(5.0, 2.0, 15.0)),
        // Sliding up the slope and digging in.
        (p(5.0, 3.5, 5.0), p(5.0, 4.5, 8.0)),
        // Passing over the top.
        (p(5.0, 6.0, -5.0), p(5.0, 6.0, 15.0)),
        // Dropping onto the block above the ramp.
        (p(5.0, 12.0, 1.0), p(5.0, 3.0, 1.0)),
        // Entering the ramp through its side.
        (p(-5.0, 4.0, 8.0), p(15.0, 4.0, 8.0)),
    ];

    let mut hits = 0;
    for trace_box in &boxes {
        for &(start, end) in &segments {
            let expected = flat.trace(start, end, trace_box);
            assert_eq!(first.trace(start, end, trace_box), expected, "{start} -> {end}");
            assert_eq!(least.trace(start, end, trace_box), expected, "{start} -> {end}");
            if expected.hit() {
                hits += 1;
            }
        }
    }
    assert!(hits >= 8, "{hits}");
}
