//! Tesselating bezier patches into triangles

use na::{Vector2, Vector3};
use std::ops::Range;

use crate::traits::vertices::{MeshVert, TexCoord, Vertex};
use crate::types::Rgba;

/// Weights of the three control points of a quadratic bezier at `t`
fn bernstein(t: f32) -> [f32; 3] {
    let s = 1.0 - t;
    [s * s, 2.0 * s * t, t * t]
}

/// Evaluate a 3x3 biquadratic patch at (u, v).
fn evaluate(grid: &[Vertex; 9], u: f32, v: f32) -> Vertex {
    let (bu, bv) = (bernstein(u), bernstein(v));

    let mut position = Vector3::zeros();
    let mut surface = Vector2::zeros();
    let mut lightmap = Vector2::zeros();
    let mut normal = Vector3::zeros();
    let mut color = [0.0f32; 4];

    for j in 0..3 {
        for i in 0..3 {
            let w = bu[i] * bv[j];
            let point = &grid[j * 3 + i];

            position += point.position * w;
            surface += point.tex.surface * w;
            lightmap += point.tex.lightmap * w;
            normal += point.normal * w;
            color[0] += point.color.r as f32 * w;
            color[1] += point.color.g as f32 * w;
            color[2] += point.color.b as f32 * w;
            color[3] += point.color.a as f32 * w;
        }
    }

    let channel = |c: f32| c.round().clamp(0.0, 255.0) as u8;
    Vertex {
        position,
        tex: TexCoord { surface, lightmap },
        normal: normal.try_normalize(1.0e-6).unwrap_or(normal),
        color: Rgba {
            r: channel(color[0]),
            g: channel(color[1]),
            b: channel(color[2]),
            a: channel(color[3]),
        },
    }
}

/// Tesselate a patch with the given control points and dimensions, appending the result.
/// Returns the new vertex and meshvert ranges, or None if the control grid isn't a valid patch.
/// Meshverts are relative to the first new vertex, like any other face's.
pub fn tesselate(
    control: &[Vertex],
    size: Vector2<i32>,
    level: u32,
    vertices: &mut Vec<Vertex>,
    meshverts: &mut Vec<MeshVert>,
) -> Option<(Range<u32>, Range<u32>)> {
    let (w, h) = (size.x, size.y);
    if w < 3 || h < 3 || w % 2 == 0 || h % 2 == 0 {
        return None;
    }

    let (w, h) = (w as usize, h as usize);
    if w.checked_mul(h) != Some(control.len()) {
        return None;
    }
    let level = level.max(1) as usize;
    let row = level + 1;

    let vert_start = vertices.len();
    let index_start = meshverts.len();

    let mut base = 0;
    for py in 0..(h - 1) / 2 {
        for px in 0..(w - 1) / 2 {
            let mut grid = [control[0]; 9];
            for j in 0..3 {
                for i in 0..3 {
                    grid[j * 3 + i] = control[(py * 2 + j) * w + px * 2 + i];
                }
            }

            for y in 0..row {
                for x in 0..row {
                    vertices.push(evaluate(
                        &grid,
                        x as f32 / level as f32,
                        y as f32 / level as f32,
                    ));
                }
            }

            for y in 0..level {
                for x in 0..level {
                    let i0 = (base + y * row + x) as MeshVert;
                    let i1 = i0 + 1;
                    let i2 = i0 + row as MeshVert;
                    let i3 = i2 + 1;
                    meshverts.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
                }
            }

            base += row * row;
        }
    }

    Some((
        vert_start as u32..vertices.len() as u32,
        index_start as u32..meshverts.len() as u32,
    ))
}
