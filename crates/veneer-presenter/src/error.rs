use thiserror::Error;

pub const CONFIG_INFO: &str =
    "presenter factory: the configuration returned by the factory callback is invalid.";
pub const MOCKING_INFO: &str = "presenter factory: the mocked view model is invalid.";
pub const SPYING_INFO: &str = "presenter factory: failed to spy on presenter.";

#[derive(Debug, Error)]
pub enum PresenterError {
    /// ConfigInvalid: the declared view model is not a derived value.
    #[error("{} The view model must be a derived value, found a {} instead.", CONFIG_INFO, .found)]
    ViewModelNotDerived { found: &'static str },

    /// OverrideInvalid: the override produced fields the real view model
    /// does not have.
    #[error("{} Mocked view model fields [{}] do not exist in the actual view model.", MOCKING_INFO, .fields.join(", "))]
    OverrideUnknownFields { fields: Vec<String> },

    /// OverrideInvalid: the override dropped fields the real view model has.
    #[error("{} Fields [{}] are missing from the mocked view model.", MOCKING_INFO, .fields.join(", "))]
    OverrideMissingFields { fields: Vec<String> },

    #[error("{} Did you call the presenter hook before calling spy()?", SPYING_INFO)]
    NoPresenterInstance,

    /// An error the user's factory callback returned, passed through with
    /// the original value preserved (downcast to recover it).
    #[error(transparent)]
    Factory(#[from] anyhow::Error),
}
