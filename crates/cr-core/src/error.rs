/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when validating a mutation against a campaign.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced character does not exist in the target campaign.
    #[error("character not found: \"{character}\" in campaign \"{campaign}\"")]
    CharacterNotFound {
        /// The campaign that was searched.
        campaign: String,
        /// The character identifier that could not be resolved.
        character: String,
    },

    /// A precondition of the mutation was violated by the current state.
    #[error("invalid state for {mutation}: {detail}")]
    InvalidState {
        /// The mutation kind whose precondition failed.
        mutation: &'static str,
        /// The violated rule, with the offending values.
        detail: String,
    },
}
