//! Interior order and second-derivative narrowing selectors.

use std::fmt;

use crate::error::OperatorError;

/// Interior order of accuracy of a boundary-optimised operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Sixth,
    Eighth,
}

impl Order {
    pub const ALL: [Order; 2] = [Order::Sixth, Order::Eighth];

    pub fn value(self) -> u32 {
        match self {
            Order::Sixth => 6,
            Order::Eighth => 8,
        }
    }

    /// Accuracy of the first-derivative boundary closure (half the interior order).
    pub fn boundary_accuracy(self) -> usize {
        self.value() as usize / 2
    }
}

impl TryFrom<u32> for Order {
    type Error = OperatorError;

    fn try_from(order: u32) -> Result<Self, Self::Error> {
        match order {
            6 => Ok(Order::Sixth),
            8 => Ok(Order::Eighth),
            _ => Err(OperatorError::UnsupportedOrder { order }),
        }
    }
}

impl From<Order> for u32 {
    fn from(order: Order) -> Self {
        order.value()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Width policy for the interior stencil of `D2`.
///
/// - `Wide` (0): `D2 = D1·D1`, the maximal interior support.
/// - `Intermediate` (1): the narrow stencil plus one point on each side.
/// - `Narrow` (2): the most compact stencil of the requested order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Narrowing {
    Wide,
    Intermediate,
    Narrow,
}

impl Narrowing {
    pub const ALL: [Narrowing; 3] = [Narrowing::Wide, Narrowing::Intermediate, Narrowing::Narrow];

    pub fn code(self) -> u8 {
        match self {
            Narrowing::Wide => 0,
            Narrowing::Intermediate => 1,
            Narrowing::Narrow => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Narrowing::Wide => "wide",
            Narrowing::Intermediate => "intermediate",
            Narrowing::Narrow => "narrow",
        }
    }
}

impl TryFrom<u8> for Narrowing {
    type Error = OperatorError;

    fn try_from(narrowing: u8) -> Result<Self, Self::Error> {
        match narrowing {
            0 => Ok(Narrowing::Wide),
            1 => Ok(Narrowing::Intermediate),
            2 => Ok(Narrowing::Narrow),
            _ => Err(OperatorError::UnsupportedNarrowing { narrowing }),
        }
    }
}

impl From<Narrowing> for u8 {
    fn from(narrowing: Narrowing) -> Self {
        narrowing.code()
    }
}

impl fmt::Display for Narrowing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
