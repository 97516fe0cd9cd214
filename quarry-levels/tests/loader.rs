use std::io::Cursor;

use nalgebra::Vector3;

use quarry_levels::prelude::*;
use quarry_levels::q3::Lump;
use quarry_levels::testkit::MapBuilder;
use quarry_levels::traits::faces::FaceType;
use quarry_levels::traits::textures::{ContentsFlags, SurfaceFlags, Texture};
use quarry_levels::traits::tree::NodeChild;
use quarry_levels::types::ParseError;

mod helpers;
use helpers::*;

/// A single leaf holding one wall
fn one_leaf() -> MapBuilder {
    let mut map = MapBuilder::new();
    let wall = map.texture("textures/base_wall/concrete", SurfaceFlags::empty(), ContentsFlags::SOLID);
    let face = map.polygon(
        wall,
        None,
        &[v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 1.0, 1.0), v(0.0, 0.0, 1.0)],
        v(-1.0, 0.0, 0.0),
    );
    map.leaf(
        0,
        Vector3::repeat(-BIG),
        Vector3::repeat(BIG),
        &[face],
        &[],
    );
    map
}

#[test]
fn loads_brush_world() {
    let world = brush_world();
    let map = &world.map;

    assert_eq!(map.textures_len(), 2);
    assert_eq!(map.brushes_len(), 3);
    assert_eq!(map.planes_len(), 3 * 6 + 3);
    assert_eq!(map.nodes_len(), 3);
    assert_eq!(map.leaves_len(), 4);
    assert!(!map.has_vis_data());

    let cube = map.get_brush(world.cube);
    assert_eq!(cube.sides.len(), 6);
    assert_eq!(cube.contents, ContentsFlags::SOLID);
    assert_eq!(map.get_brush(world.pool).contents, ContentsFlags::WATER);

    assert_eq!(map.get_texture(0).name, "solid");
    assert_eq!(map.get_texture(0).surface, SurfaceFlags::METAL_STEPS);
}

#[test]
fn finds_leaves() {
    let map = brush_world().map;

    assert_eq!(map.find_leaf(&v(1.0, 0.0, 0.0)), 0);
    assert_eq!(map.find_leaf(&v(3.0, 0.0, 0.0)), 1);
    assert_eq!(map.find_leaf(&v(9.0, 0.0, 0.0)), 2);
    assert_eq!(map.find_leaf(&v(-9.0, 0.0, 0.0)), 3);

    // Points on a plane go in front of it
    assert_eq!(map.find_leaf(&v(2.0, 0.0, 0.0)), 1);
    assert_eq!(map.find_leaf(&v(0.5, 0.0, 0.0)), 0);
}

#[test]
fn box_leaves_reaches_every_side() {
    let map = brush_world().map;
    let mut leaves = Vec::new();

    map.box_leaves(&v(0.0, 0.0, 0.0), &v(1.0, 1.0, 1.0), &mut leaves);
    leaves.sort_unstable();
    assert_eq!(leaves, vec![0, 3]);

    map.box_leaves(&v(3.0, 0.0, 0.0), &v(3.5, 1.0, 1.0), &mut leaves);
    assert_eq!(leaves, vec![1]);
}

#[test]
fn rejects_bad_magic() {
    let mut data = one_leaf().build();
    data[0..4].copy_from_slice(b"VBSP");

    assert!(matches!(Q3Map::parse(&data), Err(ParseError::BadMagic)));
}

#[test]
fn rejects_truncated_header() {
    let data = one_leaf().build();

    assert!(matches!(
        Q3Map::parse(&data[..100]),
        Err(ParseError::TruncatedHeader)
    ));
}

#[test]
fn other_versions_are_a_warning() {
    let mut map = one_leaf();
    map.version(47);
    let data = map.build();

    assert!(Q3Map::parse(&data).is_ok());

    let strict = LoadConfigBuilder::default()
        .strict_version(true)
        .build()
        .unwrap();
    assert!(matches!(
        Q3Map::load(Cursor::new(&data), &strict, &mut RawTextures),
        Err(ParseError::UnsupportedVersion(47))
    ));
}

#[test]
fn brush_side_with_missing_plane() {
    let mut map = one_leaf();
    let solid = map.texture("solid", SurfaceFlags::empty(), ContentsFlags::SOLID);
    map.brush(solid, &[(40, solid)]);

    assert!(matches!(
        map.load(),
        Err(ParseError::BadReference { index: 40, .. })
    ));
}

#[test]
fn leaf_with_missing_face() {
    let mut map = one_leaf();
    map.leaf(0, Vector3::zeros(), Vector3::zeros(), &[12], &[]);

    assert!(matches!(map.load(), Err(ParseError::BadReference { .. })));
}

#[test]
fn node_with_missing_child() {
    let mut map = one_leaf();
    let plane = map.plane(Vector3::x(), 0.0);
    map.node(
        plane,
        NodeChild::Leaf(0),
        NodeChild::Leaf(5),
        Vector3::zeros(),
        Vector3::zeros(),
    );

    assert!(matches!(map.load(), Err(ParseError::BadReference { .. })));
}

#[test]
fn shared_node_is_rejected() {
    let mut map = one_leaf();
    let plane = map.plane(Vector3::x(), 0.0);
    let root = map.reserve_node();
    let shared = map.reserve_node();
    let (min, max) = bounds(-BIG, BIG);
    map.set_node(root, plane, NodeChild::Node(shared), NodeChild::Node(shared), min, max);
    map.set_node(shared, plane, NodeChild::Leaf(0), NodeChild::Leaf(0), min, max);

    assert!(matches!(map.load(), Err(ParseError::BadTree(1))));
}

#[test]
fn cycle_is_rejected() {
    let mut map = one_leaf();
    let plane = map.plane(Vector3::x(), 0.0);
    let (min, max) = bounds(-BIG, BIG);
    map.node(plane, NodeChild::Node(0), NodeChild::Leaf(0), min, max);

    assert!(matches!(map.load(), Err(ParseError::BadTree(0))));
}

#[test]
fn misaligned_lumps_are_empty() {
    let mut map = one_leaf();
    map.override_lump(Lump::Planes, vec![0; 17]);
    map.override_lump(Lump::VisData, vec![1, 2, 3]);

    let map = map.load().unwrap();
    assert_eq!(map.planes_len(), 0);
    assert!(!map.has_vis_data());
    assert_eq!(map.faces_len(), 1);
}

#[test]
fn truncated_lump_is_empty() {
    let mut map = one_leaf();
    map.visdata(1, |_, _| true);
    let data = map.build();

    let full = Q3Map::parse(&data).unwrap();
    assert!(full.has_vis_data());

    // Visdata is the last lump in the file
    let cut = Q3Map::parse(&data[..data.len() - 4]).unwrap();
    assert!(!cut.has_vis_data());
    assert_eq!(cut.faces_len(), 1);
}

#[test]
fn cluster_outside_visdata() {
    let mut map = one_leaf();
    map.leaf(3, Vector3::zeros(), Vector3::zeros(), &[], &[]);
    map.visdata(2, |_, _| true);

    assert!(matches!(
        map.load(),
        Err(ParseError::BadReference { index: 3, .. })
    ));
}

#[test]
fn polygon_face() {
    let map = one_leaf().load().unwrap();
    let face = map.face_ref(0);

    assert_eq!(face.face.face_type, FaceType::Polygon);
    assert_eq!(face.vertices.len(), 4);
    assert_eq!(face.indices, &[0, 1, 2, 0, 2, 3]);
    assert_eq!(face.face.lightmap, None);
    assert_eq!(face.face.material, Material::Texture(TextureHandle(0)));
    assert_eq!(face.face.centroid, v(0.0, 0.5, 0.5));
}

#[test]
fn lightmap_out_of_range() {
    let mut map = one_leaf();
    map.polygon(0, Some(2), &[v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0)], Vector3::z());
    map.lightmaps(2);
    assert!(matches!(map.load(), Err(ParseError::BadReference { index: 2, .. })));

    map.lightmaps(3);
    let map = map.load().unwrap();
    assert_eq!(map.lightmaps_len(), 3);
    assert_eq!(map.get_face(1).lightmap, Some(LightmapHandle(2)));
}

#[test]
fn meshvert_past_face_vertices() {
    let mut map = one_leaf();
    map.override_lump(
        Lump::MeshVerts,
        [0i32, 1, 2, 0, 2, 7].iter().flat_map(|i| i.to_le_bytes()).collect(),
    );

    assert!(matches!(
        map.load(),
        Err(ParseError::BadReference { lump: "meshverts", index: 7 })
    ));
}

#[test]
fn patches_are_tesselated() {
    let control: Vec<_> = (0..9)
        .map(|n| v((n % 3) as f32, (n / 3) as f32, if n == 4 { 1.0 } else { 0.0 }))
        .collect();

    let mut builder = one_leaf();
    let patch = builder.patch(0, &control, 3, 3);
    let data = builder.build();

    let map = Q3Map::parse(&data).unwrap();
    let face = map.face_ref(patch);
    assert_eq!(face.face.face_type, FaceType::Patch);
    assert_eq!(face.vertices.len(), 9 * 9);
    assert_eq!(face.indices.len(), 8 * 8 * 6);

    // Corners of the patch are its corner control points
    assert_eq!(face.vertices[0].position, control[0]);
    assert_eq!(face.vertices[80].position, control[8]);

    let coarse = LoadConfigBuilder::default()
        .patch_tesselation(2)
        .build()
        .unwrap();
    let map = Q3Map::load(Cursor::new(&data), &coarse, &mut RawTextures).unwrap();
    let face = map.face_ref(patch);
    assert_eq!(face.vertices.len(), 9);
    assert_eq!(face.indices.len(), 2 * 2 * 6);
    assert!(face.indices.iter().all(|i| (*i as usize) < face.vertices.len()));
}

#[test]
fn bad_patch_isnt_drawn() {
    let mut builder = one_leaf();
    let patch = builder.patch(0, &[v(0.0, 0.0, 0.0); 4], 2, 2);

    let map = builder.load().unwrap();
    assert!(map.face_ref(patch).indices.is_empty());
}

struct Shaders;

impl MaterialResolver for Shaders {
    fn resolve(&mut self, index: u32, texture: &Texture) -> Material {
        if texture.name.starts_with("textures/base_wall") {
            Material::Shader {
                handle: ShaderHandle(100 + index),
                cull: CullFace::None,
                sort: SortClass::Opaque,
            }
        } else {
            Material::Texture(TextureHandle(index))
        }
    }
}

#[test]
fn materials_are_resolved_once() {
    let mut builder = one_leaf();
    let glass = builder.texture("textures/glass", SurfaceFlags::empty(), ContentsFlags::empty());
    builder.polygon(glass, None, &[v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0)], Vector3::z());
    let data = builder.build();

    let map = Q3Map::load(Cursor::new(&data), &LoadConfig::default(), &mut Shaders).unwrap();

    assert_eq!(
        map.get_face(0).material,
        Material::Shader {
            handle: ShaderHandle(100),
            cull: CullFace::None,
            sort: SortClass::Opaque,
        }
    );
    assert_eq!(map.get_face(1).material, Material::Texture(TextureHandle(1)));
}
