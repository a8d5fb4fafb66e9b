use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registro de usuário mantido pelo store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,  // assigned by the store, never by the caller
    pub name: String,
    pub email: String,
}

/// Raw input bound from a form submission or JSON body.
///
/// Both fields are optional here so that a missing field reaches
/// [`UserInput::validate`] instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Input that passed validation. The store only accepts this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn required(field: &str, label: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: format!("The {} field is required.", label),
        }
    }
}

impl UserInput {
    /// Presence check on `name` and `email`. Blank values count as missing;
    /// accepted values are kept exactly as submitted.
    pub fn validate(&self) -> Result<NewUser, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = present(&self.name);
        if name.is_none() {
            errors.push(FieldError::required("name", "Name"));
        }

        let email = present(&self.email);
        if email.is_none() {
            errors.push(FieldError::required("email", "Email"));
        }

        match (name, email) {
            (Some(name), Some(email)) => Ok(NewUser {
                name: name.to_string(),
                email: email.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&User> for UserInput {
    fn from(user: &User) -> Self {
        UserInput {
            name: Some(user.name.clone()),
            email: Some(user.email.clone()),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Response de listagem
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<User>,
    pub count: usize,
}

/// Response de usuário único
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub deleted: bool,
}
