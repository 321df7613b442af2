use crate::{Boundary, Error};

/// Cubic lattice used to place molecule centers in the box.
#[derive(Debug)]
pub struct Cubic {
    a: f64,
}

impl Cubic {
    pub fn new(a: f64) -> Result<Self, Error> {
        if !(a > 0.0) {
            return Err(Error::config(format!(
                "lattice constant should be positive, found {}",
                a
            )));
        }
        Ok(Self { a })
    }

    /// Largest lattice constant that fits `count` sites in the box.
    pub fn fit(boundary: &Boundary, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::config("cannot build a lattice for zero sites"));
        }
        let mut n = (count as f64).cbrt().round() as usize;
        if n * n * n < count {
            n += 1;
        }
        Self::new(boundary.side() / n as f64)
    }

    pub fn cell_length(&self) -> f64 {
        self.a
    }

    /// The first `count` lattice sites inside the box, offset half a cell
    /// from the origin so no site sits on a face.
    pub fn sites(&self, boundary: &Boundary, count: usize) -> Result<Vec<[f64; 3]>, Error> {
        // tolerant of a = L/n rounding to slightly above L/n
        let per_axis = (boundary.side() / self.a + 1e-9).floor() as usize;
        if per_axis * per_axis * per_axis < count {
            return Err(Error::config(format!(
                "box of side {} fits {} lattice sites at spacing {}, {} requested",
                boundary.side(),
                per_axis * per_axis * per_axis,
                self.a,
                count
            )));
        }
        let half = 0.5 * self.a;
        let mut coords = Vec::with_capacity(count);
        'fill: for i in 0..per_axis {
            for j in 0..per_axis {
                for k in 0..per_axis {
                    if coords.len() == count {
                        break 'fill;
                    }
                    coords.push([
                        half + self.a * i as f64,
                        half + self.a * j as f64,
                        half + self.a * k as f64,
                    ]);
                }
            }
        }
        Ok(coords)
    }
}
