use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quarry_levels::prelude::*;
use quarry_levels::testkit::MapBuilder;
use quarry_levels::visibility::leaf_visible;

mod helpers;
use helpers::*;

#[test]
fn one_way_visibility() {
    let map = split_map();

    let back = v(-10.0, 0.0, 0.0);
    let front = v(10.0, 0.0, 0.0);

    assert_eq!(map.point_cluster(&back), 0);
    assert_eq!(map.point_cluster(&front), 1);

    assert!(!visible(&map, &back, &front));
    assert!(visible(&map, &front, &back));
    assert!(visible(&map, &back, &back));
}

#[test]
fn plane_belongs_to_front() {
    let map = split_map();
    assert_eq!(map.point_cluster(&v(0.0, 5.0, 5.0)), 1);
}

#[test]
fn matches_cluster_lookup() {
    let map = split_map();
    let mut rng = StdRng::seed_from_u64(0xc1a5);

    for _ in 0..200 {
        let a = v(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0), 0.0);
        let b = v(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0), 0.0);

        let from = map.point_cluster(&a) as u32;
        let to = map.point_cluster(&b) as u32;

        assert_eq!(visible(&map, &a, &b), map.cluster_visible_from(from, to));
        assert_eq!(
            visible(&map, &a, &b),
            map.all_visible_from(from).any(|c| c == to)
        );
    }
}

#[test]
fn all_visible_from_lists_clusters() {
    let map = split_map();

    assert_eq!(map.all_visible_from(0).collect::<Vec<_>>(), vec![0]);
    assert_eq!(map.all_visible_from(1).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn no_visdata_sees_everything() {
    let mut map = MapBuilder::new();
    let plane = map.plane(nalgebra::Vector3::x(), 0.0);
    let (min, max) = bounds(-BIG, 0);
    let back = map.leaf(0, min, max, &[], &[]);
    let (min, max) = bounds(0, BIG);
    let front = map.leaf(1, min, max, &[], &[]);
    let (min, max) = bounds(-BIG, BIG);
    map.node(
        plane,
        quarry_levels::traits::tree::NodeChild::Leaf(front),
        quarry_levels::traits::tree::NodeChild::Leaf(back),
        min,
        max,
    );
    let map = map.load().unwrap();

    assert!(!map.has_vis_data());
    assert!(visible(&map, &v(-1.0, 0.0, 0.0), &v(1.0, 0.0, 0.0)));
    assert!(visible(&map, &v(1.0, 0.0, 0.0), &v(-1.0, 0.0, 0.0)));
}

#[test]
fn leaves_without_clusters_are_visible() {
    let world = brush_world();
    let leaf = world.map.get_leaf(0);
    assert_eq!(leaf.cluster(), None);

    let map = split_map();
    let back = map.get_leaf(map.find_leaf(&v(-1.0, 0.0, 0.0)));
    let front = map.get_leaf(map.find_leaf(&v(1.0, 0.0, 0.0)));
    assert!(!leaf_visible(&map, back, front));
    assert!(leaf_visible(&map, back, leaf));
}
