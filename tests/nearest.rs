use kdthree::{BoundingBox, BoundingSphere, DVec3, KdTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(rng: &mut StdRng, count: usize, extent: f64) -> Vec<DVec3> {
    (0..count)
        .map(|_| {
            DVec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect()
}

fn build_tree(points: &[DVec3], max_leaf_size: usize, max_depth: usize) -> KdTree {
    let mut tree = KdTree::with_limits(max_leaf_size, max_depth);
    tree.add_points(points.iter().copied());
    tree.build().expect("Build should succeed");
    tree
}

#[test]
fn test_points_find_themselves() {
    let mut rng = StdRng::seed_from_u64(42);
    let points = random_points(&mut rng, 2000, 50.0);
    let tree = build_tree(&points, 8, 25);

    for (i, &p) in points.iter().enumerate() {
        let nearest = tree
            .find_closest_point(p, 0.0)
            .unwrap()
            .unwrap_or_else(|| panic!("Point {} not found", i));
        assert_eq!(nearest.index, i, "Point {} matched {}", i, nearest.index);
        assert_eq!(nearest.distance, 0.0);
    }
}

#[test]
fn test_box_query_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    let points = random_points(&mut rng, 1500, 10.0);
    let tree = build_tree(&points, 4, 25);

    // A half extent covering twice the point envelope always contains the true nearest point.
    for _ in 0..1000 {
        let q = DVec3::new(
            rng.gen_range(-12.0..12.0),
            rng.gen_range(-12.0..12.0),
            rng.gen_range(-12.0..12.0),
        );
        let found = tree.find_closest_point(q, 50.0).unwrap().unwrap();
        let expected = tree.find_closest_point_brute(q).unwrap();
        assert_eq!(
            found.distance, expected.distance,
            "Query {:?}: tree found {} at {}, brute force {} at {}",
            q, found.index, found.distance, expected.index, expected.distance
        );
    }
}

#[test]
fn test_sphere_query_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(11);
    let points = random_points(&mut rng, 1500, 10.0);
    let tree = build_tree(&points, 16, 25);

    for _ in 0..1000 {
        let q = DVec3::new(
            rng.gen_range(-15.0..15.0),
            rng.gen_range(-15.0..15.0),
            rng.gen_range(-15.0..15.0),
        );
        let found = tree.find_closest_point_in_sphere(q, f64::INFINITY).unwrap().unwrap();
        let expected = tree.find_closest_point_brute(q).unwrap();
        assert_eq!(found.distance, expected.distance, "Query {:?}", q);
    }
}

#[test]
fn test_bounded_queries_return_nearest_inside_region() {
    let mut rng = StdRng::seed_from_u64(3);
    let points = random_points(&mut rng, 800, 5.0);
    let tree = build_tree(&points, 6, 25);

    for _ in 0..500 {
        let q = DVec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        let distance = rng.gen_range(0.0..1.5);

        let cube = BoundingBox::cube(q, distance);
        let expected = points
            .iter()
            .filter(|&&p| cube.contains(p))
            .map(|p| p.distance(q))
            .fold(None, |best: Option<f64>, d| Some(best.map_or(d, |b| b.min(d))));
        let found = tree.find_closest_point(q, distance).unwrap().map(|n| n.distance);
        assert_eq!(found, expected, "Cube query {:?} with half extent {}", q, distance);

        let sphere = BoundingSphere::new(q, distance);
        let expected = points
            .iter()
            .filter(|&&p| sphere.contains(p))
            .map(|p| p.distance(q))
            .fold(None, |best: Option<f64>, d| Some(best.map_or(d, |b| b.min(d))));
        let found = tree.find_closest_point_in_sphere(q, distance).unwrap().map(|n| n.distance);
        assert_eq!(found, expected, "Sphere query {:?} with radius {}", q, distance);
    }
}

#[test]
fn test_clustered_points() {
    // Two dense clusters far apart produce an unbalanced midpoint split.
    let mut rng = StdRng::seed_from_u64(99);
    let mut points = Vec::new();
    for _ in 0..500 {
        points.push(DVec3::new(rng.gen_range(0.0..0.01), rng.gen_range(0.0..0.01), rng.gen_range(0.0..0.01)));
    }
    for _ in 0..10 {
        points.push(DVec3::new(rng.gen_range(99.0..100.0), rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)));
    }
    let tree = build_tree(&points, 4, 25);

    for _ in 0..200 {
        let q = DVec3::new(rng.gen_range(-1.0..101.0), rng.gen_range(-1.0..2.0), rng.gen_range(-1.0..2.0));
        let found = tree.find_closest_point_in_sphere(q, f64::INFINITY).unwrap().unwrap();
        let expected = tree.find_closest_point_brute(q).unwrap();
        assert_eq!(found.distance, expected.distance);
    }
}

#[test]
fn test_concurrent_queries_on_built_tree() {
    let mut rng = StdRng::seed_from_u64(5);
    let points = random_points(&mut rng, 1000, 10.0);
    let tree = build_tree(&points, 8, 25);

    std::thread::scope(|s| {
        for t in 0..4 {
            let tree = &tree;
            let points = &points;
            s.spawn(move || {
                for (i, &p) in points.iter().enumerate().skip(t).step_by(4) {
                    assert_eq!(tree.find_closest_point(p, 0.0).unwrap().unwrap().index, i);
                }
            });
        }
    });
}
