/// Tag for the custom NewOrder event.
pub const NEW_ORDER_TAG: u8 = u8::MAX - 5;

/// Tag for the custom CancelOrder event.
pub const CANCEL_ORDER_TAG: u8 = u8::MAX - 6;

/// Tag for the custom ChangePrice event.
pub const CHANGE_PRICE_TAG: u8 = u8::MAX - 7;

/// Tag for the custom Buy event.
pub const BUY_TAG: u8 = u8::MAX - 8;
