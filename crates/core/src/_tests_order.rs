#![cfg(test)]

use super::error::OperatorError;
use super::order::{Narrowing, Order};

#[test]
fn order_parses_only_six_and_eight() {
    assert_eq!(Order::try_from(6), Ok(Order::Sixth));
    assert_eq!(Order::try_from(8), Ok(Order::Eighth));
    for order in [0, 2, 4, 7, 10] {
        assert_eq!(
            Order::try_from(order),
            Err(OperatorError::UnsupportedOrder { order })
        );
    }
}

#[test]
fn order_values_and_boundary_accuracy() {
    assert_eq!(u32::from(Order::Sixth), 6);
    assert_eq!(Order::Eighth.value(), 8);
    assert_eq!(Order::Sixth.boundary_accuracy(), 3);
    assert_eq!(Order::Eighth.boundary_accuracy(), 4);
    assert_eq!(Order::Eighth.to_string(), "8");
}

#[test]
fn narrowing_codes_round_trip() {
    for narrowing in Narrowing::ALL {
        assert_eq!(Narrowing::try_from(narrowing.code()), Ok(narrowing));
    }
    assert_eq!(u8::from(Narrowing::Narrow), 2);
    assert_eq!(
        Narrowing::try_from(3),
        Err(OperatorError::UnsupportedNarrowing { narrowing: 3 })
    );
}

#[test]
fn narrowing_displays_label() {
    assert_eq!(Narrowing::Wide.to_string(), "wide");
    assert_eq!(Narrowing::Intermediate.to_string(), "intermediate");
    assert_eq!(Narrowing::Narrow.to_string(), "narrow");
}

#[test]
fn error_messages_name_the_offending_value() {
    let err = OperatorError::UnsupportedOrder { order: 7 };
    assert!(err.to_string().contains('7'));
    let err = OperatorError::InsufficientGridSize {
        order: Order::Sixth,
        narrowing: Narrowing::Narrow,
        points: 14,
        minimum: 15,
    };
    let message = err.to_string();
    assert!(message.contains("14"));
    assert!(message.contains("15"));
    assert!(message.contains("narrow"));
}
