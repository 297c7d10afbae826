use std::collections::HashMap;

use time::Date;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::users::dto::{CreateUserRequest, Violation};

const NAMESPACE: &str = "User";
const FIELDS: [&str; 5] = ["name", "email", "password", "date", "company"];

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// A creation payload that passed every constraint.
#[derive(Debug)]
pub struct ValidUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub date: Date,
    pub company: String,
}

/// Checks the creation constraints; one violation per failing field, in
/// declaration order.
pub fn violations(req: &CreateUserRequest) -> Vec<Violation> {
    let Err(errors) = req.validate() else {
        return Vec::new();
    };
    collect(&errors)
}

pub fn validate_new_user(req: CreateUserRequest) -> Result<ValidUser, Vec<Violation>> {
    let found = violations(&req);
    match req.date {
        Some(date) if found.is_empty() => Ok(ValidUser {
            name: req.name,
            email: req.email,
            password: req.password,
            date,
            company: req.company,
        }),
        _ => Err(found),
    }
}

fn collect(errors: &ValidationErrors) -> Vec<Violation> {
    let by_field: HashMap<String, &Vec<ValidationError>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();

    FIELDS
        .iter()
        .filter_map(|field| {
            let first = by_field
                .get(*field)?
                .iter()
                .min_by_key(|e| precedence(&e.code))?;
            let (tag, value) = describe(first);
            Some(Violation {
                failed_field: format!("{NAMESPACE}.{field}"),
                tag,
                value,
            })
        })
        .collect()
}

// required is reported before format, format before length
fn precedence(code: &str) -> u8 {
    match code {
        "required" => 0,
        "email" => 1,
        _ => 2,
    }
}

fn describe(err: &ValidationError) -> (String, String) {
    if err.code != "length" {
        return (err.code.to_string(), String::new());
    }
    let param = |key: &str| err.params.get(key).map(|v| v.to_string());
    let len = err
        .params
        .get("value")
        .and_then(|v| v.as_str())
        .map(|s| s.chars().count() as u64);
    let min = err.params.get("min").and_then(|v| v.as_u64());
    match (len, min) {
        (Some(len), Some(min)) if len < min => ("min".into(), param("min").unwrap_or_default()),
        _ => match param("max") {
            Some(max) => ("max".into(), max),
            None => ("min".into(), param("min").unwrap_or_default()),
        },
    }
}
