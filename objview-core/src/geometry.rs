/// Geometry primitives: points, faces and bounding boxes
use nalgebra::{Point3, Vector3};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{Error, Result};

/// A point in 3D space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Largest absolute coordinate difference to `other`.
    pub fn max_distance(&self, other: &Vertex) -> f32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(p: Point3<f32>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vector3<f32>> for Vertex {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vertex> for Point3<f32> {
    fn from(v: Vertex) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}

impl From<Vertex> for Vector3<f32> {
    fn from(v: Vertex) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl Add for Vertex {
    type Output = Vertex;

    fn add(self, rhs: Vertex) -> Vertex {
        Vertex::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vertex {
    type Output = Vertex;

    fn sub(self, rhs: Vertex) -> Vertex {
        Vertex::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vertex {
    type Output = Vertex;

    fn mul(self, scalar: f32) -> Vertex {
        Vertex::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Div<f32> for Vertex {
    type Output = Vertex;

    fn div(self, scalar: f32) -> Vertex {
        Vertex::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Vertex {
    type Output = Vertex;

    fn neg(self) -> Vertex {
        Vertex::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vertex {
    fn add_assign(&mut self, rhs: Vertex) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vertex {
    fn sub_assign(&mut self, rhs: Vertex) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vertex {
    fn mul_assign(&mut self, scalar: f32) {
        *self = *self * scalar;
    }
}

impl DivAssign<f32> for Vertex {
    fn div_assign(&mut self, scalar: f32) {
        *self = *self / scalar;
    }
}

/// A face: an ordered list of zero-based indices into a mesh's vertices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    indices: Vec<u32>,
}

impl Polygon {
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Index stored at `position`, checked.
    pub fn get(&self, position: usize) -> Result<u32> {
        self.indices
            .get(position)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index: position as i64,
                len: self.indices.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }
}

impl From<Vec<u32>> for Polygon {
    fn from(indices: Vec<u32>) -> Self {
        Self::new(indices)
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a u32;
    type IntoIter = std::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vertex,
    pub max: Vertex,
}

impl Bounds {
    /// Smallest box containing every vertex, or `None` for an empty set.
    pub fn from_vertices<'a>(vertices: impl IntoIterator<Item = &'a Vertex>) -> Option<Self> {
        let mut iter = vertices.into_iter();
        let first = *iter.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for v in iter {
            bounds.min.x = bounds.min.x.min(v.x);
            bounds.min.y = bounds.min.y.min(v.y);
            bounds.min.z = bounds.min.z.min(v.z);
            bounds.max.x = bounds.max.x.max(v.x);
            bounds.max.y = bounds.max.y.max(v.y);
            bounds.max.z = bounds.max.z.max(v.z);
        }
        Some(bounds)
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vertex {
        self.max - self.min
    }

    pub fn center(&self) -> Vertex {
        (self.min + self.max) / 2.0
    }

    /// Largest of the three extents.
    pub fn max_extent(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_default() {
        let v = Vertex::default();
        assert_eq!(v, Vertex::zero());
    }

    #[test]
    fn test_vertex_arithmetic() {
        let a = Vertex::new(1.0, 2.0, 3.0);
        let b = Vertex::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vertex::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vertex::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vertex::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vertex::new(2.0, 2.5, 3.0));
        assert_eq!(-a, Vertex::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_vertex_compound_assignment() {
        let mut v = Vertex::new(1.0, 2.0, 3.0);
        v += Vertex::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vertex::new(2.0, 3.0, 4.0));
        v -= Vertex::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vertex::new(1.0, 2.0, 3.0));
        v *= 2.0;
        assert_eq!(v, Vertex::new(2.0, 4.0, 6.0));
        v /= 2.0;
        assert_eq!(v, Vertex::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_vertex_nalgebra_conversion() {
        let v = Vertex::new(1.0, -2.0, 0.5);
        let p: Point3<f32> = v.into();
        assert_eq!(Vertex::from(p), v);
        let n: Vector3<f32> = v.into();
        assert_eq!(Vertex::from(n), v);
    }

    #[test]
    fn test_polygon_access() {
        let p = Polygon::new(vec![10, 20, 30]);
        assert_eq!(p.len(), 3);
        assert!(!p.is_empty());
        assert_eq!(p.get(0).unwrap(), 10);
        assert_eq!(p.get(2).unwrap(), 30);
        assert!(matches!(
            p.get(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(Polygon::default().is_empty());
        assert_eq!(p.iter().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn test_bounds() {
        let vertices = [
            Vertex::new(-1.0, 0.0, 2.0),
            Vertex::new(3.0, -4.0, 2.0),
            Vertex::new(1.0, 2.0, 6.0),
        ];
        let bounds = Bounds::from_vertices(&vertices).unwrap();
        assert_eq!(bounds.min, Vertex::new(-1.0, -4.0, 2.0));
        assert_eq!(bounds.max, Vertex::new(3.0, 2.0, 6.0));
        assert_eq!(bounds.size(), Vertex::new(4.0, 6.0, 4.0));
        assert_eq!(bounds.center(), Vertex::new(1.0, -1.0, 4.0));
        assert_eq!(bounds.max_extent(), 6.0);
    }

    #[test]
    fn test_bounds_empty() {
        let vertices: [Vertex; 0] = [];
        assert!(Bounds::from_vertices(&vertices).is_none());
    }
}
