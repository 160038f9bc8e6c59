use crate::geometry::primitives::Bounds;

/// Trait for types that can detect collisions between `Self` and `T`.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for shared properties of shapes that take part in nesting.
pub trait Shape {
    /// Axis-aligned bounding box of the shape, in the coordinate frame it lives in.
    fn bbox(&self) -> Bounds;

    /// Area of the bounding box.
    /// Nesting treats this as the area a shape consumes, whatever its outline looks like.
    fn bbox_area(&self) -> f64 {
        self.bbox().area()
    }
}
