use veneer_core::Derived;

use crate::error::PresenterError;
use crate::types::{PresenterConfig, ViewModelOverride};
use crate::view_model::{ViewModel, ViewModelSource};

/// Structural check on a factory callback's output. Hands back the
/// validated derived view model so the caller need not re-match.
pub fn validate_presenter_config<P>(
    config: &PresenterConfig<P>,
) -> Result<Derived<ViewModel>, PresenterError> {
    match &config.view_model {
        ViewModelSource::Derived(d) => Ok(d.clone()),
        other => Err(PresenterError::ViewModelNotDerived {
            found: other.kind(),
        }),
    }
}

/// Runs the override against the real view model and checks the field sets
/// match exactly. Unknown fields are reported before missing ones; when
/// both sets are non-empty only the unknown-fields failure surfaces.
pub fn validate_view_model_override(
    overridden: &ViewModelOverride,
    actual: &ViewModel,
) -> Result<(), PresenterError> {
    let proposed = overridden(actual);

    let unknown: Vec<String> = proposed
        .keys()
        .filter(|k| !actual.contains(k))
        .map(str::to_owned)
        .collect();
    let missing: Vec<String> = actual
        .keys()
        .filter(|k| !proposed.contains(k))
        .map(str::to_owned)
        .collect();

    if !unknown.is_empty() {
        return Err(PresenterError::OverrideUnknownFields { fields: unknown });
    }
    if !missing.is_empty() {
        return Err(PresenterError::OverrideMissingFields { fields: missing });
    }
    Ok(())
}
