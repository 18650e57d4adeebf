pub mod assistant;
pub mod clock;
pub mod dialogue;
pub mod extract;
pub mod speech;
pub mod validation;
