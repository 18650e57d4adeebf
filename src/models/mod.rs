pub mod booking;
pub mod session;

pub use booking::{BookingRecord, ServiceKind};
pub use session::{DialogueState, Session};
