//! Boundary-adapted 1D grid helpers.

use crate::order::Order;

/// Placement of the stretched points next to each boundary.
///
/// Offsets are in units of the interior spacing `h`. Past the stretched
/// region the grid is equidistant with `x[i] = h·(i − shift)`, and the right
/// boundary mirrors the left one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryLayout {
    pub offsets: &'static [f64],
    pub shift: f64,
}

impl BoundaryLayout {
    pub const SIXTH: Self = Self {
        offsets: &[0.0, 0.45, 1.52],
        shift: 0.48,
    };

    pub const EIGHTH: Self = Self {
        offsets: &[0.0, 0.40, 1.37, 2.39],
        shift: 0.61,
    };

    pub fn for_order(order: Order) -> Self {
        match order {
            Order::Sixth => Self::SIXTH,
            Order::Eighth => Self::EIGHTH,
        }
    }

    pub fn stretched_points(&self) -> usize {
        self.offsets.len()
    }

    /// Domain length in units of `h` for a grid of `points` points.
    pub fn span(&self, points: usize) -> f64 {
        (points - 1) as f64 - 2.0 * self.shift
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    length: f64,
    spacing: f64,
    offsets: Vec<f64>,
    x: Vec<f64>,
}

impl Grid1D {
    /// Build the grid on `[0, length]`.
    ///
    /// Callers guarantee `points >= 2 * layout.stretched_points()` and a
    /// positive `length`; the builders check both before getting here.
    pub fn boundary_adapted(points: usize, length: f64, layout: &BoundaryLayout) -> Self {
        let span = layout.span(points);
        let spacing = length / span;
        let stretched = layout.stretched_points();
        let offsets: Vec<f64> = (0..points)
            .map(|i| {
                if i < stretched {
                    layout.offsets[i]
                } else if i >= points - stretched {
                    span - layout.offsets[points - 1 - i]
                } else {
                    i as f64 - layout.shift
                }
            })
            .collect();
        let x = (0..points)
            .map(|i| {
                if i >= points - stretched {
                    length - spacing * layout.offsets[points - 1 - i]
                } else {
                    spacing * offsets[i]
                }
            })
            .collect();
        Self {
            length,
            spacing,
            offsets,
            x,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Uniform interior spacing `h`.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Coordinates divided by `h`.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.x
    }

    pub fn into_coordinates(self) -> Vec<f64> {
        self.x
    }
}
