//! Credential input rules and the field-tagged auth result.

use async_graphql::SimpleObject;
use validator::Validate;

use super::User;
use crate::config::{
    FIELD_PASSWORD, FIELD_USERNAME, MSG_PASSWORD_TOO_SHORT, MSG_USERNAME_TOO_SHORT,
};

/// A failure tied to one named input.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of `register` and `login`.
///
/// Either `errors` is a non-empty list or `user` is set, never both and
/// never neither; the fields are private so only the constructors in this
/// module can build one.
#[derive(Debug, Clone, SimpleObject)]
pub struct UserResponse {
    errors: Option<Vec<FieldError>>,
    user: Option<User>,
}

impl UserResponse {
    /// Successful result carrying the user
    pub fn success(user: User) -> Self {
        Self {
            errors: None,
            user: Some(user),
        }
    }

    /// Failed result with a single field error
    pub fn failure(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: Some(vec![FieldError::new(field, message)]),
            user: None,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn authenticated_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.user.is_some()
    }
}

impl From<FieldError> for UserResponse {
    fn from(error: FieldError) -> Self {
        Self {
            errors: Some(vec![error]),
            user: None,
        }
    }
}

/// Username/password pair as submitted by the client.
///
/// Lengths are counted in characters.
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(length(min = 3))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check registration rules; the username rule is reported first.
    pub fn registration_error(&self) -> Option<FieldError> {
        let errors = self.validate().err()?;
        let fields = errors.field_errors();

        [
            (FIELD_USERNAME, MSG_USERNAME_TOO_SHORT),
            (FIELD_PASSWORD, MSG_PASSWORD_TOO_SHORT),
        ]
        .into_iter()
        .find(|(field, _)| fields.get(*field).is_some())
        .map(|(field, message)| FieldError::new(field, message))
    }
}
