use crate::config::DialogueConfig;
use crate::errors::Result;
use crate::models::{BookingRecord, DialogueState, ServiceKind, Session};
use crate::services::clock::Clock;
use crate::services::extract::{
    classify_service, extract_count, extract_date, is_in_domain,
};
use crate::services::validation::{validate_booking_date, validate_stay};
use crate::store::BookingStore;

pub const EXIT_KEYWORDS: [&str; 4] = ["exit", "quit", "stop", "bye"];
const CONFIRM_KEYWORDS: [&str; 3] = ["yes", "confirm", "correct"];
const CHANGE_DATE_PHRASES: [&str; 2] = ["change date", "change the date"];

pub const INTRO: &str = "Hello. I am an AI assistant for hotel room booking, \
    event hall booking and conference hall booking. How can I assist you today?";
pub const FAREWELL: &str = "Thank you for using the booking assistant. Goodbye.";
pub const OUT_OF_DOMAIN: &str = "I can only assist with hotel room or event hall bookings.";
pub const BOOKED: &str = "Your booking has been confirmed successfully. Thank you.";

const ASK_NAME: &str = "Please tell me the booking name.";
const ASK_ROOMS: &str = "How many rooms would you like to book?";
const REPROMPT_ROOMS: &str = "Please tell me the number of rooms.";
const ASK_CHECKIN: &str = "Please tell me the check in date.";
const REPROMPT_CHECKIN: &str = "Please provide a valid check in date.";
const ASK_NEW_CHECKIN: &str = "Please provide the new check in date.";
const ASK_CHECKOUT: &str = "Please tell me the check out date.";
const REPROMPT_CHECKOUT: &str = "Please provide a valid check out date.";
const ASK_GUESTS: &str = "How many guests will be staying?";
const REPROMPT_GUESTS: &str = "Please tell me the number of guests.";
const REPROMPT_CONFIRM: &str =
    "Please say yes to confirm or say change date to modify your booking.";
const START_OVER: &str = "I'm sorry, something went wrong. Could you start over?";

/// What the caller should do after speaking the reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue,
    Exit,
    Booked(BookingRecord),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

#[derive(Debug, Clone)]
pub struct Turn {
    pub session: Session,
    pub reply: String,
    pub outcome: Outcome,
}

impl Turn {
    fn reply(session: Session, reply: impl Into<String>) -> Self {
        Self {
            session,
            reply: reply.into(),
            outcome: Outcome::Continue,
        }
    }
}

/// Lowercases, strips periods and trims a raw transcript.
pub fn normalize_utterance(raw: &str) -> String {
    raw.to_lowercase().replace('.', "").trim().to_string()
}

/// Capitalises the first letter of every alphabetic run.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// The booking conversation state machine.
///
/// `handle` never mutates the session it is given; the next session comes back
/// in the [`Turn`]. A failed save therefore leaves the caller holding the
/// confirm-state session.
pub struct DialogueEngine {
    config: DialogueConfig,
    store: Box<dyn BookingStore>,
    clock: Box<dyn Clock>,
}

impl DialogueEngine {
    pub fn new(
        config: DialogueConfig,
        store: Box<dyn BookingStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    pub fn handle(&self, utterance: &str, session: &Session) -> Result<Turn> {
        let text = normalize_utterance(utterance);
        let session = session.clone();
        let from = session.state;

        let turn = if contains_any(&text, &EXIT_KEYWORDS) {
            Turn {
                session: Session::new(),
                reply: FAREWELL.to_string(),
                outcome: Outcome::Exit,
            }
        } else {
            match session.state {
                DialogueState::Greeting => self.greeting(session, &text),
                DialogueState::AskName => self.ask_name(session, &text),
                DialogueState::AskRooms => self.ask_rooms(session, &text),
                DialogueState::AskCheckin => self.ask_checkin(session, &text),
                DialogueState::AskCheckout => self.ask_checkout(session, &text),
                DialogueState::AskGuests => self.ask_guests(session, &text),
                DialogueState::Confirm => self.confirm(session, &text)?,
            }
        };

        tracing::info!(
            from = from.as_str(),
            to = turn.session.state.as_str(),
            terminal = turn.outcome.is_terminal(),
            "processed utterance"
        );

        Ok(turn)
    }

    fn greeting(&self, mut session: Session, text: &str) -> Turn {
        if !is_in_domain(text) {
            tracing::debug!("utterance outside booking domain");
            return Turn::reply(session, OUT_OF_DOMAIN);
        }

        session.service = classify_service(text);
        session.state = DialogueState::AskName;
        Turn::reply(session, ASK_NAME)
    }

    fn ask_name(&self, mut session: Session, text: &str) -> Turn {
        session.name = Some(title_case(text));

        if session.service == Some(ServiceKind::Room) && self.config.ask_room_count {
            session.state = DialogueState::AskRooms;
            Turn::reply(session, ASK_ROOMS)
        } else {
            session.rooms = Some(1);
            session.state = DialogueState::AskCheckin;
            Turn::reply(session, ASK_CHECKIN)
        }
    }

    fn ask_rooms(&self, mut session: Session, text: &str) -> Turn {
        let Some(rooms) = extract_count(text).filter(|n| *n > 0) else {
            tracing::debug!("no room count found");
            return Turn::reply(session, REPROMPT_ROOMS);
        };

        session.rooms = Some(rooms);
        session.state = DialogueState::AskCheckin;
        Turn::reply(session, ASK_CHECKIN)
    }

    fn ask_checkin(&self, mut session: Session, text: &str) -> Turn {
        let today = self.clock.today();
        let Some(checkin) = extract_date(text, today) else {
            tracing::debug!("no check in date found");
            return Turn::reply(session, REPROMPT_CHECKIN);
        };

        if let Err(rejection) =
            validate_booking_date(checkin, today, self.config.max_advance_days)
        {
            tracing::debug!(%checkin, ?rejection, "check in date rejected");
            return Turn::reply(session, rejection.to_string());
        }

        session.checkin = Some(checkin);
        session.state = DialogueState::AskCheckout;
        Turn::reply(session, ASK_CHECKOUT)
    }

    fn ask_checkout(&self, mut session: Session, text: &str) -> Turn {
        let today = self.clock.today();
        let Some(checkout) = extract_date(text, today) else {
            tracing::debug!("no check out date found");
            return Turn::reply(session, REPROMPT_CHECKOUT);
        };

        let Some(checkin) = session.checkin else {
            session.state = DialogueState::AskCheckin;
            return Turn::reply(session, ASK_CHECKIN);
        };

        let verdict = validate_stay(checkin, checkout).and_then(|_| {
            validate_booking_date(checkout, today, self.config.max_advance_days)
        });
        if let Err(rejection) = verdict {
            tracing::debug!(%checkout, ?rejection, "check out date rejected");
            return Turn::reply(session, rejection.to_string());
        }

        session.checkout = Some(checkout);
        session.state = DialogueState::AskGuests;
        Turn::reply(session, ASK_GUESTS)
    }

    fn ask_guests(&self, mut session: Session, text: &str) -> Turn {
        let Some(guests) = extract_count(text).filter(|n| *n > 0) else {
            tracing::debug!("no guest count found");
            return Turn::reply(session, REPROMPT_GUESTS);
        };

        session.guests = Some(guests);
        session.state = DialogueState::Confirm;
        let summary = summarize(&session);
        Turn::reply(session, summary)
    }

    fn confirm(&self, mut session: Session, text: &str) -> Result<Turn> {
        if contains_any(text, &CHANGE_DATE_PHRASES) {
            session.state = DialogueState::AskCheckin;
            return Ok(Turn::reply(session, ASK_NEW_CHECKIN));
        }

        if !contains_any(text, &CONFIRM_KEYWORDS) {
            return Ok(Turn::reply(session, REPROMPT_CONFIRM));
        }

        let Some(record) = self.build_record(&session) else {
            tracing::warn!(?session, "confirm reached with incomplete session");
            return Ok(Turn::reply(Session::new(), START_OVER));
        };

        self.store.append(&record)?;

        Ok(Turn {
            session: Session::new(),
            reply: BOOKED.to_string(),
            outcome: Outcome::Booked(record),
        })
    }

    fn build_record(&self, session: &Session) -> Option<BookingRecord> {
        let checkin = session.checkin?;
        let checkout = session.checkout?;
        validate_stay(checkin, checkout).ok()?;

        Some(BookingRecord {
            name: session.name.clone()?,
            service: session.service?,
            rooms: session.rooms?,
            checkin: checkin.to_string(),
            checkout: checkout.to_string(),
            guests: session.guests?,
            timestamp: self.clock.now().format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        })
    }
}

fn summarize(session: &Session) -> String {
    let field = |value: Option<String>| value.unwrap_or_else(|| "unknown".to_string());
    format!(
        "Please confirm your booking details. \
         Name: {}. \
         Service: {}. \
         Rooms: {}. \
         Check in: {}. \
         Check out: {}. \
         Guests: {}. \
         Say yes or correct to confirm. \
         If you want to change date say change date.",
        field(session.name.clone()),
        field(session.service.map(|s| s.as_str().to_string())),
        field(session.rooms.map(|n| n.to_string())),
        field(session.checkin.map(|d| d.to_string())),
        field(session.checkout.map(|d| d.to_string())),
        field(session.guests.map(|n| n.to_string())),
    )
}
