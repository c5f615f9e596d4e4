use std::fs;
use std::path::Path;

use crate::boundary::{Boundary, Interval};
use crate::error::{PointIndexError, Result};
use crate::point::Point;
use crate::r#type::Element;

/// A collection of points with the same dimensionality, loadable from memory
/// or from a text file. Repeated loads append to the current dataset.
///
/// The file format is whitespace-separated:
///
/// ```text
/// <D> <N>
/// <p1_1> <p1_2> ... <p1_D>
/// ...
/// <pN_1> <pN_2> ... <pN_D>
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset<const D: usize, E: Element> {
    points: Vec<Point<D, E>>,
}

impl<const D: usize, E: Element> Dataset<D, E> {
    /// Construct an empty dataset.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append the given points to the dataset.
    pub fn load_points(&mut self, new_points: &[Point<D, E>]) {
        self.points.extend_from_slice(new_points);
    }

    /// Append the points in the given text file to the dataset.
    ///
    /// A missing file or a malformed header leaves the dataset unchanged.
    /// Running out of tokens before the promised point count keeps whatever
    /// was read.
    pub fn load_file(&mut self, path: impl AsRef<Path>) {
        let _ = self.try_load_file(path);
    }

    /// Like [`load_file`][Dataset::load_file], but reports why loading
    /// failed. Returns the number of points appended.
    pub fn try_load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let contents = fs::read_to_string(path)?;
        let mut tokens = contents.split_whitespace();

        let dims = header_value(tokens.next(), "dimension count")?;
        let count = header_value(tokens.next(), "point count")?;
        if dims < 1 || count < 1 {
            return Err(PointIndexError::MalformedHeader(format!(
                "{dims} dimensions, {count} points"
            )));
        }
        let dims = dims as usize;
        let count = count as usize;

        self.points.reserve(count);
        let mut added = 0;
        'points: for _ in 0..count {
            let mut coords = [E::zero(); D];
            for d in 0..dims {
                let Some(value) = tokens.next().and_then(|token| token.parse::<f64>().ok())
                else {
                    break 'points;
                };
                if d < D {
                    coords[d] = E::cast(value);
                }
            }
            self.points.push(Point::new(coords));
            added += 1;
        }
        Ok(added)
    }

    /// The tightest boundary enclosing every point in the dataset, or an
    /// all-zero boundary when the dataset is empty.
    pub fn compute_boundary(&self) -> Boundary<D, E> {
        let Some((first, rest)) = self.points.split_first() else {
            return Boundary::splat(Interval::new(E::zero(), E::zero()));
        };
        let mut boundary = Boundary::new(std::array::from_fn(|d| {
            Interval::new(first[d], first[d])
        }));
        for point in rest {
            for d in 0..D {
                if point[d] < boundary[d].min {
                    boundary[d].min = point[d];
                } else if point[d] > boundary[d].max {
                    boundary[d].max = point[d];
                }
            }
        }
        boundary
    }

    /// All points currently in the dataset.
    pub fn points(&self) -> &[Point<D, E>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn header_value(token: Option<&str>, what: &str) -> Result<i64> {
    token
        .and_then(|token| token.parse::<i64>().ok())
        .ok_or_else(|| PointIndexError::MalformedHeader(format!("{what} is not an integer")))
}
