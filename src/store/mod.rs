pub mod json_file;

pub use json_file::JsonFileStore;

use crate::errors::Result;
use crate::models::BookingRecord;

/// Append-only persistence for confirmed bookings.
pub trait BookingStore: Send + Sync {
    fn append(&self, record: &BookingRecord) -> Result<()>;

    fn load(&self) -> Result<Vec<BookingRecord>>;
}
