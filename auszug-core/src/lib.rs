//! auszug-core: booking records shared by the parser, the rule engine and the CSV export

pub mod amount;
pub mod booking;

pub use amount::{Amount, normalize_amount};
pub use booking::Booking;
