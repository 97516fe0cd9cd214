//! Testing a shape against a single brush

use super::context::TraceWork;
use super::DIST_EPSILON;
use crate::traits::brushes::Brush;
use crate::traits::planes::HasPlanes;
use crate::traits::textures::HasTextures;

/// Clip the trace to the brush, if it enters it before anything else it's hit.
pub(super) fn clip_to_brush<M: HasPlanes + HasTextures>(map: &M, brush: &Brush, work: &mut TraceWork) {
    if brush.sides.is_empty() {
        return;
    }

    let mut enter_frac = -1.0;
    let mut leave_frac = 1.0;
    let mut clip_plane = None;
    let mut lead_side = None;

    let mut gets_out = false;
    let mut starts_out = false;

    for side in brush.sides.iter() {
        let plane = map.get_plane(side.plane_idx);
        let dist = plane.dist + work.shape.offset(&plane.normal);

        let d1 = plane.axis.dot(&plane.normal, &work.start) - dist;
        let d2 = plane.axis.dot(&plane.normal, &work.end) - dist;

        if d2 > 0.0 {
            gets_out = true;
        }
        if d1 > 0.0 {
            starts_out = true;
        }

        // Completely in front of this side, so outside the brush
        if d1 > 0.0 && (d2 >= DIST_EPSILON || d2 >= d1) {
            return;
        }

        // Completely behind this side
        if d1 <= 0.0 && d2 <= 0.0 {
            continue;
        }

        if d1 > d2 {
            // Entering
            let f = (d1 - DIST_EPSILON) / (d1 - d2);
            if f > enter_frac {
                enter_frac = f;
                clip_plane = Some(plane);
                lead_side = Some(side);
            }
        } else {
            // Leaving
            let f = (d1 + DIST_EPSILON) / (d1 - d2);
            if f < leave_frac {
                leave_frac = f;
            }
        }
    }

    if !starts_out {
        work.trace.start_solid = true;
        if !gets_out {
            work.trace.all_solid = true;
            work.trace.fraction = 0.0;
            work.trace.contents = brush.contents;
        }
        return;
    }

    if enter_frac < leave_frac && enter_frac > -1.0 && enter_frac < work.trace.fraction {
        work.trace.fraction = enter_frac.max(0.0);
        work.trace.plane = clip_plane.copied();
        work.trace.contents = brush.contents;
        if let Some(side) = lead_side {
            work.trace.surface_flags = map.get_texture(side.texture_idx).surface;
        }
    }
}

/// Check whether the shape, sitting at the start of the trace, touches the brush.
pub(super) fn test_in_brush<M: HasPlanes>(map: &M, brush: &Brush, work: &mut TraceWork) {
    if brush.sides.is_empty() {
        return;
    }

    for side in brush.sides.iter() {
        let plane = map.get_plane(side.plane_idx);

        // Entirely in front of one side
        if plane.distance_to(&work.start) > work.shape.offset(&plane.normal) {
            return;
        }
    }

    work.trace.start_solid = true;
    work.trace.all_solid = true;
    work.trace.fraction = 0.0;
    work.trace.contents |= brush.contents;
}
