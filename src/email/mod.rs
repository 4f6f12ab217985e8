//! Outbound email: composition and Postmark delivery.

pub mod compose;
pub mod postmark;

pub use compose::{Composer, OutboundEmail};
pub use postmark::{DeliveryOutcome, EmailDelivery, PostmarkClient};
