mod error;
mod requests;
mod types;
mod validation;

pub use error::ValidationError;
pub use requests::{CompetitionRequest, ParticipantRequest, RegistrationRequest};
pub use types::{Competition, CompetitionDraft, Participant, ParticipantDraft, Registration};
pub use validation::{
    is_valid_email, parse_date, validate_competition, validate_participant, MAX_TEXT_LEN,
};
