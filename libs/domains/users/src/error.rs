use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Group '{0}' already exists")]
    DuplicateGroupName(String),

    #[error("Unknown group ids: {}", format_ids(.0))]
    UnknownGroups(Vec<Uuid>),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

fn format_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for UserError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<String> = field_errors.keys().map(|k| k.to_string()).collect();
        fields.sort_unstable();
        UserError::Validation(format!("invalid fields: {}", fields.join(", ")))
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail(_) | UserError::DuplicateGroupName(_) => {
                AppError::Conflict(err.to_string())
            }
            UserError::UnknownGroups(_) | UserError::Validation(_) => {
                AppError::BadRequest(err.to_string())
            }
            UserError::PasswordHash(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn status_codes() {
        let cases = [
            (UserError::DuplicateEmail("a@b.c".into()), StatusCode::CONFLICT),
            (UserError::DuplicateGroupName("Admins".into()), StatusCode::CONFLICT),
            (UserError::UnknownGroups(vec![Uuid::nil()]), StatusCode::BAD_REQUEST),
            (UserError::Validation("name".into()), StatusCode::BAD_REQUEST),
            (UserError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn unknown_groups_message_lists_ids() {
        let err = UserError::UnknownGroups(vec![Uuid::nil(), Uuid::max()]);
        let message = err.to_string();
        assert!(message.contains(&Uuid::nil().to_string()));
        assert!(message.contains(&Uuid::max().to_string()));
    }

    #[test]
    fn validation_errors_name_the_fields_in_order() {
        use validator::Validate;

        let input = crate::models::CreateUser {
            name: String::new(),
            email: "not-an-email".into(),
            password: "secret".into(),
            group_ids: Vec::new(),
        };
        let err = UserError::from(input.validate().unwrap_err());
        assert_eq!(err.to_string(), "Invalid input: invalid fields: email, name");
    }
}
