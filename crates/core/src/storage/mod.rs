mod error;
mod http_mapping;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::{
    repository_error_public_message, repository_error_to_status_code, INTERNAL_ERROR_MESSAGE,
};
pub use traits::{CompetitionRepository, ParticipantRepository, StoreHealth};
