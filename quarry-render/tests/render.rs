use std::io::Cursor;

use quarry_levels::prelude::*;
use quarry_levels::testkit::MapBuilder;
use quarry_levels::traits::textures::{ContentsFlags, SurfaceFlags, Texture};
use quarry_levels::traits::tree::NodeChild;
use quarry_render::{LevelRenderer, RenderConfig, RenderConfigBuilder};
use quarry_types::Vector3i;

mod helpers;
use helpers::*;

/// Two rooms either side of x = 0, sharing a floor.
/// Cluster 1 (x >= 0) can see cluster 0, but not the other way round.
///
/// Faces:
///  0. x = 10, facing -x, in the front room
///  1. the floor, in both rooms
///  2. x = -10, facing +x, in the back room
///  3. x = 12, facing +x, in the front room
fn two_rooms() -> Q3Map {
    let mut map = MapBuilder::new();
    let tex = map.texture("wall", SurfaceFlags::empty(), ContentsFlags::SOLID);

    let (points, normal) = wall(10.0, -1.0);
    let front_wall = map.polygon(tex, None, &points, normal);
    let floor = map.polygon(
        tex,
        None,
        &[
            v(-5.0, -5.0, -1.0),
            v(5.0, -5.0, -1.0),
            v(5.0, 5.0, -1.0),
            v(-5.0, 5.0, -1.0),
        ],
        v(0.0, 0.0, 1.0),
    );
    let (points, normal) = wall(-10.0, 1.0);
    let back_wall = map.polygon(tex, None, &points, normal);
    let (points, normal) = wall(12.0, 1.0);
    let away_wall = map.polygon(tex, None, &points, normal);

    let back = map.leaf(
        0,
        Vector3i::new(-BIG, -BIG, -BIG),
        Vector3i::new(0, BIG, BIG),
        &[floor, back_wall],
        &[],
    );
    let front = map.leaf(
        1,
        Vector3i::new(0, -BIG, -BIG),
        Vector3i::new(BIG, BIG, BIG),
        &[front_wall, floor, away_wall],
        &[],
    );

    let plane = map.plane(v(1.0, 0.0, 0.0), 0.0);
    let (min, max) = everywhere();
    map.node(plane, NodeChild::Leaf(front), NodeChild::Leaf(back), min, max);
    map.visdata(2, |from, to| from == to || (from == 1 && to == 0));

    map.load().unwrap()
}

#[test]
fn shared_face_drawn_once() {
    let map = two_rooms();
    let mut renderer = LevelRenderer::new(&map, RenderConfig::default());
    let mut backend = Recorder::default();

    let stats = renderer.render(&camera(v(5.0, 0.0, 0.0), true), &mut backend);

    assert_eq!(stats.leaves_visited, 2);
    assert_eq!(stats.faces_culled, 1);
    assert_eq!(
        backend.calls,
        vec![
            Call::Texture(TextureHandle(0), None),
            Call::Face(1),
            Call::Face(3),
            Call::Face(2),
            Call::Flush,
        ]
    );
}

#[test]
fn frames_start_fresh() {
    let map = two_rooms();
    let mut renderer = LevelRenderer::new(&map, RenderConfig::default());
    let vp = camera(v(5.0, 0.0, 0.0), true);

    let mut first = Recorder::default();
    let mut second = Recorder::default();
    let stats = renderer.render(&vp, &mut first);

    assert_eq!(renderer.render(&vp, &mut second), stats);
    assert_eq!(first.calls, second.calls);
}

#[test]
fn pvs_hides_unseen_cluster() {
    let map = two_rooms();
    let mut renderer = LevelRenderer::new(&map, RenderConfig::default());
    let mut backend = Recorder::default();

    let stats = renderer.render(&camera(v(-5.0, 0.0, 0.0), false), &mut backend);

    assert_eq!(stats.pvs_culled, 1);
    assert_eq!(stats.leaves_visited, 1);
    assert_eq!(backend.faces(), vec![1]);
}

#[test]
fn leaves_behind_the_camera_are_culled() {
    let map = two_rooms();
    let mut renderer = LevelRenderer::new(&map, RenderConfig::default());
    let mut backend = Recorder::default();

    let stats = renderer.render(&camera(v(5.0, 0.0, 0.0), false), &mut backend);

    assert_eq!(stats.frustum_culled, 1);
    assert_eq!(stats.pvs_culled, 0);
    assert_eq!(backend.faces(), vec![0, 1]);
}

#[test]
fn backface_culling_can_be_turned_off() {
    let map = two_rooms();
    let config = RenderConfigBuilder::default()
        .backface_culling(false)
        .build()
        .unwrap();
    let mut renderer = LevelRenderer::new(&map, config);
    let mut backend = Recorder::default();

    let stats = renderer.render(&camera(v(5.0, 0.0, 0.0), false), &mut backend);

    assert_eq!(stats.faces_culled, 0);
    assert_eq!(backend.faces(), vec![0, 1, 3]);
}

/// A single leaf, with no visibility data, containing walls facing the origin.
fn one_room<R: MaterialResolver>(walls: &[(&str, f32, Option<u32>)], lightmaps: u32, resolver: &mut R) -> Q3Map {
    let mut map = MapBuilder::new();
    let mut faces = Vec::new();
    let mut textures: Vec<&str> = Vec::new();

    for (name, x, lightmap) in walls {
        let tex = match textures.iter().position(|t| t == name) {
            Some(idx) => idx as u32,
            None => {
                textures.push(*name);
                map.texture(name, SurfaceFlags::empty(), ContentsFlags::SOLID)
            }
        };

        let (points, normal) = wall(*x, -1.0);
        faces.push(map.polygon(tex, *lightmap, &points, normal));
    }

    let (min, max) = everywhere();
    map.leaf(-1, min, max, &faces, &[]);
    map.lightmaps(lightmaps);

    Q3Map::load(Cursor::new(map.build()), &LoadConfig::default(), resolver).unwrap()
}

struct Shaders;

impl MaterialResolver for Shaders {
    fn resolve(&mut self, index: u32, texture: &Texture) -> Material {
        let (handle, sort) = match texture.name.as_str() {
            "glass" => (10, SortClass::Blend0),
            "water" => (11, SortClass::Underwater),
            "decal" => (12, SortClass::Decal),
            _ => return Material::Texture(TextureHandle(index)),
        };

        Material::Shader {
            handle: ShaderHandle(handle),
            cull: CullFace::None,
            sort,
        }
    }
}

#[test]
fn translucent_faces_back_to_front() {
    let map = one_room(
        &[
            ("glass", 3.0, None),
            ("decal", 6.0, None),
            ("glass", 8.0, None),
            ("water", 5.0, None),
            ("wall", 7.0, None),
            ("decal", 4.0, None),
        ],
        0,
        &mut Shaders,
    );
    let mut renderer = LevelRenderer::new(&map, RenderConfig::default());
    let mut backend = Recorder::default();

    renderer.render(&camera(v(0.0, 0.0, 0.0), false), &mut backend);

    assert_eq!(
        backend.calls,
        vec![
            Call::Texture(TextureHandle(3), None),
            Call::Face(4),
            // Opaque, in the order they were found
            Call::Shader(ShaderHandle(12)),
            Call::Face(1),
            Call::Face(5),
            // Translucent, furthest first
            Call::Shader(ShaderHandle(10)),
            Call::Face(2),
            Call::Shader(ShaderHandle(11)),
            Call::Face(3),
            Call::Shader(ShaderHandle(10)),
            Call::Face(0),
            Call::Flush,
        ]
    );
}

#[test]
fn raw_faces_grouped_by_texture_and_lightmap() {
    let map = one_room(
        &[
            ("b", 2.0, Some(0)),
            ("a", 3.0, None),
            ("b", 4.0, Some(0)),
            ("a", 5.0, Some(1)),
            ("a", 6.0, None),
        ],
        2,
        &mut RawTextures,
    );
    let mut renderer = LevelRenderer::new(&map, RenderConfig::default());
    let mut backend = Recorder::default();

    renderer.render(&camera(v(0.0, 0.0, 0.0), false), &mut backend);

    let (a, b) = (TextureHandle(1), TextureHandle(0));
    assert_eq!(
        backend.calls,
        vec![
            Call::Texture(b, Some(LightmapHandle(0))),
            Call::Face(0),
            Call::Face(2),
            Call::Texture(a, None),
            Call::Face(1),
            Call::Face(4),
            Call::Texture(a, Some(LightmapHandle(1))),
            Call::Face(3),
            Call::Flush,
        ]
    );
}

#[test]
fn full_queue_drops_faces() {
    let walls: Vec<_> = (0..5).map(|n| ("wall", 2.0 + n as f32, None)).collect();
    let map = one_room(&walls, 0, &mut RawTextures);

    let config = RenderConfigBuilder::default()
        .max_primitives(2usize)
        .build()
        .unwrap();
    let mut renderer = LevelRenderer::new(&map, config);
    let mut backend = Recorder::default();

    let stats = renderer.render(&camera(v(0.0, 0.0, 0.0), false), &mut backend);

    assert_eq!(stats.faces_queued, 2);
    assert_eq!(stats.faces_dropped, 3);
    assert_eq!(backend.faces(), vec![0, 1]);
}
