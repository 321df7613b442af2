use crate::Error;

/// Cubic periodic simulation box with side length `L`.
///
/// All coordinates live in [0, L) after wrapping. Interaction distances
/// between atoms of different molecules must go through [`minimum_image`],
/// never through raw coordinate differences.
///
/// [`minimum_image`]: Boundary::minimum_image
#[derive(Clone, Copy, Debug)]
pub struct Boundary {
    side: f64,
    periodic: bool,
}

impl Boundary {
    /// Create a periodic cubic box of the given side length.
    pub fn periodic(side: f64) -> Result<Self, Error> {
        if !(side > 0.0) {
            return Err(Error::config(format!(
                "box side length should be positive, found {}",
                side
            )));
        }
        Ok(Self {
            side,
            periodic: true,
        })
    }

    /// Create an open (non-wrapping) box of the given side length.
    pub fn open(side: f64) -> Result<Self, Error> {
        let mut b = Self::periodic(side)?;
        b.periodic = false;
        Ok(b)
    }

    pub fn side(&self) -> f64 {
        self.side
    }
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Map a coordinate into [0, L).
    ///
    /// Total over all finite inputs; applying it twice is a no-op.
    pub fn wrap_coord(&self, x: f64) -> f64 {
        if !self.periodic {
            return x;
        }
        let wrapped = x - self.side * (x / self.side).floor();
        // floor(x/L)*L can round up to exactly L for x slightly below 0
        if wrapped >= self.side {
            wrapped - self.side
        } else {
            wrapped
        }
    }

    /// Map a position into the box, componentwise.
    pub fn wrap(&self, position: [f64; 3]) -> [f64; 3] {
        [
            self.wrap_coord(position[0]),
            self.wrap_coord(position[1]),
            self.wrap_coord(position[2]),
        ]
    }

    /// Displacement from `b` to the closest periodic image of `a`.
    ///
    /// Componentwise `d - L*round(d/L)` with `d = a - b`, so each component
    /// lies in [-L/2, L/2]. This is the only distance measure intermolecular
    /// forces may use.
    pub fn minimum_image(&self, a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
        let mut delta = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
        if self.periodic {
            for d in delta.iter_mut() {
                *d -= self.side * (*d / self.side).round();
            }
        }
        delta
    }
}
