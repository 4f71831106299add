//! Window classification.
//!
//! Turns a [`Window`] into the short token that identifies its application.

use crate::model::Window;

/// Return the normalized application token for `window`.
///
/// The class is preferred, then the instance.  The chosen value is trimmed
/// and lower-cased.  A window with neither (or only blank ones) yields the
/// empty string; that is a normal outcome, not an error.
pub fn classify(window: &Window) -> String {
    [window.class.as_deref(), window.instance.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|raw| !raw.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_default()
}
