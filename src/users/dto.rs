use serde::{Deserialize, Serialize};
use time::Date;
use validator::Validate;

use crate::pagination::Page;
use crate::users::repo_types::{iso_date, User};
use crate::users::validation::not_blank;

/// Request body for user creation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"), length(min = 3, max = 40))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"), email, length(min = 6, max = 32))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
    #[serde(default, with = "iso_date::option")]
    #[validate(required)]
    pub date: Option<Date>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"), length(min = 3, max = 40))]
    pub company: String,
}

/// Request body for a partial update; other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub failed_field: String, // e.g. "User.name"
    pub tag: String,          // required | email | min | max
    pub value: String,        // rule parameter, empty when it has none
}

/// Echo of a created user, without the password.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub company: String,
}

impl From<User> for CreatedUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            date: u.date,
            company: u.company,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub message: &'static str,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub data: Page<User>,
}
