use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceKind {
    #[serde(rename = "room")]
    Room,
    #[serde(rename = "event hall")]
    Hall,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Room => "room",
            ServiceKind::Hall => "event hall",
        }
    }
}

/// A confirmed booking as written to the booking file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub name: String,
    pub service: ServiceKind,
    pub rooms: u32,
    /// ISO date, e.g. `2026-10-18`.
    pub checkin: String,
    pub checkout: String,
    pub guests: u32,
    pub timestamp: String,
}
