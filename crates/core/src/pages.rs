//! Page ownership, authorization and scheduling rules.
//!
//! Every mutating operation receives the acting user explicitly as an
//! [`Actor`]; there is no ambient "current user".

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::{Date, DbId};

/// Maximum page title length in characters. `u64` to match `validator`'s
/// length bounds.
pub const TITLE_MAX_LEN: u64 = 200;

/// The user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: DbId,
    /// Role name, see [`crate::roles`].
    pub role: String,
}

impl Actor {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Check that `actor` may create a page attributed to `author_id`.
///
/// Non-admins can only create their own pages. Whether `author_id` exists is
/// checked separately against the user table.
pub fn authorize_create(actor: &Actor, author_id: DbId) -> Result<(), CoreError> {
    if actor.is_admin() || actor.user_id == author_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You can't create a page for another user".into(),
        ))
    }
}

/// Check that `actor` may edit a page currently owned by `current_author`
/// and attribute it to `new_author`.
pub fn authorize_update(
    actor: &Actor,
    current_author: DbId,
    new_author: DbId,
) -> Result<(), CoreError> {
    if actor.is_admin() {
        return Ok(());
    }
    if actor.user_id != current_author {
        return Err(CoreError::Forbidden("You can't edit this page".into()));
    }
    if new_author != current_author {
        return Err(CoreError::Forbidden(
            "You can't change the author of this page".into(),
        ));
    }
    Ok(())
}

/// Check that `actor` may delete a page owned by `author_id`.
pub fn authorize_delete(actor: &Actor, author_id: DbId) -> Result<(), CoreError> {
    if actor.is_admin() || actor.user_id == author_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden("You can't delete this page".into()))
    }
}

/// A publication date, when set, may not precede the creation date.
pub fn check_publication_date(
    creation_date: Date,
    publication_date: Option<Date>,
) -> Result<(), CoreError> {
    match publication_date {
        Some(published) if published < creation_date => Err(CoreError::InvalidScheduling(
            format!("The publication date {published} cannot be before the creation date {creation_date}"),
        )),
        _ => Ok(()),
    }
}

/// Validate a page title (non-empty after trimming, at most 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() as u64 > TITLE_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}
