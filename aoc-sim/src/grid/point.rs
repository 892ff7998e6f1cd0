//! Value-type coordinates and axis-aligned extents

use std::ops::RangeInclusive;

/// A cell coordinate in `D` dimensions
///
/// The first two components are the column (`x`) and row (`y`) of the parsed
/// input; any further components start at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point<const D: usize>(pub [i32; D]);

impl<const D: usize> Point<D> {
    /// A point on the input plane; every axis past `y` is 0
    ///
    /// # Panics
    /// If `D < 2`. [`Grid::parse`](crate::Grid::parse) rejects such grids
    /// before building any point.
    pub fn planar(x: i32, y: i32) -> Self {
        let mut coords = [0; D];
        coords[0] = x;
        coords[1] = y;
        Point(coords)
    }

    /// This point moved by `delta`
    pub fn offset(self, delta: &[i32; D]) -> Self {
        let mut coords = self.0;
        for (c, d) in coords.iter_mut().zip(delta) {
            *c += d;
        }
        Point(coords)
    }
}

/// Offsets to every Moore neighbor: `3^D - 1` of them
pub(crate) fn neighbor_offsets<const D: usize>() -> Vec<[i32; D]> {
    let total = 3usize.pow(D as u32);
    (0..total)
        .map(|mut n| {
            let mut delta = [0; D];
            for d in delta.iter_mut() {
                *d = (n % 3) as i32 - 1;
                n /= 3;
            }
            delta
        })
        .filter(|delta| delta.iter().any(|&d| d != 0))
        .collect()
}

/// Inclusive axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds<const D: usize> {
    min: [i32; D],
    max: [i32; D],
}

impl<const D: usize> Bounds<D> {
    /// Smallest box containing every point, `None` for no points
    pub(crate) fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point<D>>,
    {
        points.into_iter().fold(None, |bounds, Point(coords)| {
            Some(match bounds {
                None => Bounds {
                    min: coords,
                    max: coords,
                },
                Some(mut b) => {
                    for ((lo, hi), c) in b.min.iter_mut().zip(b.max.iter_mut()).zip(coords) {
                        *lo = (*lo).min(c);
                        *hi = (*hi).max(c);
                    }
                    b
                }
            })
        })
    }

    /// Grown by `by` cells in both directions on every axis
    pub(crate) fn expanded(mut self, by: i32) -> Self {
        for (lo, hi) in self.min.iter_mut().zip(self.max.iter_mut()) {
            *lo -= by;
            *hi += by;
        }
        self
    }

    pub(crate) fn axis(&self, axis: usize) -> RangeInclusive<i32> {
        self.min[axis]..=self.max[axis]
    }

    /// This box flattened to a single value on `axis`
    pub(crate) fn slice(mut self, axis: usize, value: i32) -> Self {
        self.min[axis] = value;
        self.max[axis] = value;
        self
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, point: &Point<D>) -> bool {
        point
            .0
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }

    /// Every point inside the box, first axis varying fastest
    pub(crate) fn points(&self) -> BoundsPoints<D> {
        BoundsPoints {
            bounds: *self,
            cursor: Some(self.min),
        }
    }
}

pub(crate) struct BoundsPoints<const D: usize> {
    bounds: Bounds<D>,
    cursor: Option<[i32; D]>,
}

impl<const D: usize> Iterator for BoundsPoints<D> {
    type Item = Point<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;

        let mut following = current;
        self.cursor = None;
        for (axis, c) in following.iter_mut().enumerate() {
            if *c < self.bounds.max[axis] {
                *c += 1;
                self.cursor = Some(following);
                break;
            }
            *c = self.bounds.min[axis];
        }

        Some(Point(current))
    }
}
