use crate::point::Point;
use crate::r#type::Element;

/// The operational contract shared by every index structure in this crate.
///
/// All structures store a set of points with exact-match semantics: a point
/// is either present or it is not, where "the same point" means coordinate-wise
/// equality under the element tolerance (the Bit Hash index is the one
/// exception and compares raw bit patterns). Harness code can swap structures
/// freely through this trait.
pub trait PointIndex<const D: usize, E: Element> {
    /// Insert a point. Returns `true` if the point was newly added and
    /// `false` if it was already stored.
    fn insert(&mut self, point: &Point<D, E>) -> bool;

    /// Remove a point. Returns `true` if the point was present.
    fn remove(&mut self, point: &Point<D, E>) -> bool;

    /// Return `true` if the point is stored in the structure.
    fn query(&self, point: &Point<D, E>) -> bool;
}
