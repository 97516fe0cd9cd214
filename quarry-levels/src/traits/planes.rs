use na::Vector3;
use std::iter::Iterator;

/// Shortcut for planes whose normal is exactly a positive axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneAxis {
    X,
    Y,
    Z,
    NonAxial,
}

impl PlaneAxis {
    pub fn from_normal(normal: &Vector3<f32>) -> PlaneAxis {
        if *normal == Vector3::x() {
            PlaneAxis::X
        } else if *normal == Vector3::y() {
            PlaneAxis::Y
        } else if *normal == Vector3::z() {
            PlaneAxis::Z
        } else {
            PlaneAxis::NonAxial
        }
    }

    /// `normal · v`, without the multiply when we can get away with it.
    #[inline]
    pub fn dot(self, normal: &Vector3<f32>, v: &Vector3<f32>) -> f32 {
        match self {
            PlaneAxis::X => v.x,
            PlaneAxis::Y => v.y,
            PlaneAxis::Z => v.z,
            PlaneAxis::NonAxial => normal.dot(v),
        }
    }
}

/// Where a box lies relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxSide {
    Front,
    Back,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal
    pub normal: Vector3<f32>,

    /// Distance from origin to plane along normal
    pub dist: f32,

    pub axis: PlaneAxis,
}

impl Plane {
    /// `normal` is assumed to be of unit length.
    pub fn new(normal: Vector3<f32>, dist: f32) -> Plane {
        Plane {
            normal,
            dist,
            axis: PlaneAxis::from_normal(&normal),
        }
    }

    /// Signed distance of `point` from the plane, positive in front.
    #[inline]
    pub fn distance_to(&self, point: &Vector3<f32>) -> f32 {
        self.axis.dot(&self.normal, point) - self.dist
    }

    /// The corner of the box furthest along the normal.
    pub fn positive_vertex(&self, mins: &Vector3<f32>, maxs: &Vector3<f32>) -> Vector3<f32> {
        Vector3::from_fn(|i, _| {
            if self.normal[i] >= 0.0 {
                maxs[i]
            } else {
                mins[i]
            }
        })
    }

    /// The corner of the box furthest against the normal.
    pub fn negative_vertex(&self, mins: &Vector3<f32>, maxs: &Vector3<f32>) -> Vector3<f32> {
        Vector3::from_fn(|i, _| {
            if self.normal[i] >= 0.0 {
                mins[i]
            } else {
                maxs[i]
            }
        })
    }

    /// Classify an axis aligned box. Touching the plane counts as in front.
    pub fn box_side(&self, mins: &Vector3<f32>, maxs: &Vector3<f32>) -> BoxSide {
        let front = self.distance_to(&self.positive_vertex(mins, maxs)) >= 0.0;
        let back = self.distance_to(&self.negative_vertex(mins, maxs)) < 0.0;

        match (front, back) {
            (true, false) => BoxSide::Front,
            (false, true) => BoxSide::Back,
            _ => BoxSide::Both,
        }
    }
}

pub trait HasPlanes {
    type PlanesIter<'a>: Iterator<Item = &'a Plane>
    where
        Self: 'a;

    fn planes_iter(&self) -> Self::PlanesIter<'_>;
    fn planes_len(&self) -> u32;
    fn get_plane(&self, idx: u32) -> &Plane;
}
