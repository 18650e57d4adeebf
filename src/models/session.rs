use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ServiceKind;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Greeting,
    AskName,
    AskRooms,
    AskCheckin,
    AskCheckout,
    AskGuests,
    Confirm,
}

impl DialogueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueState::Greeting => "greeting",
            DialogueState::AskName => "ask_name",
            DialogueState::AskRooms => "ask_rooms",
            DialogueState::AskCheckin => "ask_checkin",
            DialogueState::AskCheckout => "ask_checkout",
            DialogueState::AskGuests => "ask_guests",
            DialogueState::Confirm => "confirm",
        }
    }
}

/// Everything collected so far in one conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub state: DialogueState,
    pub service: Option<ServiceKind>,
    pub name: Option<String>,
    pub rooms: Option<u32>,
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
    pub guests: Option<u32>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
