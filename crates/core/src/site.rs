//! Site-wide settings rules.

use crate::error::CoreError;

/// Maximum length of the site display name, in characters.
pub const SITE_NAME_MAX_LEN: usize = 20;

/// Validate a new site display name and return it trimmed.
pub fn normalize_site_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyName);
    }
    if trimmed.chars().count() > SITE_NAME_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Site name must be at most {SITE_NAME_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
