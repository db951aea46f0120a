//! Operator factory: dispatches a construction request to the builder for
//! the requested interior order.

use crate::{
    builder::{self, OperatorBuilder, ORDER6_BUILDER, ORDER8_BUILDER},
    bundle::OperatorBundle,
    error::OperatorResult,
    order::{Narrowing, Order},
};

/// Builder responsible for `order`.
pub fn builder_for(order: Order) -> &'static dyn OperatorBuilder {
    match order {
        Order::Sixth => &ORDER6_BUILDER,
        Order::Eighth => &ORDER8_BUILDER,
    }
}

/// Build the SBP operator set of interior order `order` on `points` grid
/// points spanning `[0, length]`.
///
/// The arguments reach the order-specific builder unchanged and its result,
/// success or failure, is returned as is.
pub fn construct(
    order: Order,
    points: usize,
    length: f64,
    narrowing: Narrowing,
) -> OperatorResult<OperatorBundle> {
    match order {
        Order::Sixth => builder::order6(points, length, narrowing),
        Order::Eighth => builder::order8(points, length, narrowing),
    }
}

/// [`construct`] for callers holding raw integer codes.
///
/// The order is checked first, so an unsupported order is reported as
/// [`crate::OperatorError::UnsupportedOrder`] whatever the other arguments are.
pub fn construct_raw(
    order: u32,
    points: usize,
    length: f64,
    narrowing: u8,
) -> OperatorResult<OperatorBundle> {
    let order = Order::try_from(order)?;
    let narrowing = Narrowing::try_from(narrowing)?;
    construct(order, points, length, narrowing)
}

pub fn minimum_points(order: Order, narrowing: Narrowing) -> usize {
    builder_for(order).minimum_points(narrowing)
}
