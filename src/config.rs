use std::env;
use std::path::PathBuf;

use crate::errors::{AppError, Result};

/// Booking horizon in days (roughly eight months).
pub const DEFAULT_MAX_ADVANCE_DAYS: i64 = 240;
/// Upper bound accepted for `MAX_ADVANCE_DAYS` (a hundred years).
pub const MAX_ADVANCE_DAYS_LIMIT: i64 = 36_500;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub booking_file: PathBuf,
    pub dialogue: DialogueConfig,
}

/// The part of the configuration the dialogue engine reads.
#[derive(Clone, Debug)]
pub struct DialogueConfig {
    pub max_advance_days: i64,
    /// Ask for a room count when a hotel room is booked. When off, every booking is
    /// recorded with a single room.
    pub ask_room_count: bool,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_advance_days: DEFAULT_MAX_ADVANCE_DAYS,
            ask_room_count: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            booking_file: env::var("BOOKING_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("bookings.json")),
            dialogue: DialogueConfig {
                max_advance_days: env::var("MAX_ADVANCE_DAYS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|days: &i64| *days >= 0)
                    .unwrap_or(DEFAULT_MAX_ADVANCE_DAYS),
                ask_room_count: env::var("ASK_ROOM_COUNT")
                    .ok()
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(true),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.booking_file.as_os_str().is_empty() {
            return Err(AppError::Config("BOOKING_FILE must not be empty".to_string()));
        }
        if self.booking_file.is_dir() {
            return Err(AppError::Config(format!(
                "BOOKING_FILE points at a directory: {}",
                self.booking_file.display()
            )));
        }
        if !(0..=MAX_ADVANCE_DAYS_LIMIT).contains(&self.dialogue.max_advance_days) {
            return Err(AppError::Config(format!(
                "MAX_ADVANCE_DAYS must be between 0 and {MAX_ADVANCE_DAYS_LIMIT}, got {}",
                self.dialogue.max_advance_days
            )));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
