//! Customer model and form types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validation::{lenient_text, parse_integer, FieldErrors, ValidationPolicy, PLAIN_NAME_CHARSET};

/// Customer record as stored; `name` and `city` are HTML-escaped
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub age: i32,
}

/// Customer form as submitted (JSON or url-encoded)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CustomerForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    /// Age in years, 0 to 150
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = Option<i32>)]
    pub age: Option<String>,
}

/// Validated customer data, ready to be escaped and stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub city: String,
    pub age: i32,
}

/// Customer list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerQuery {
    /// Substring of the customer name
    pub search: Option<String>,
}

#[derive(Debug, Validate)]
struct CustomerFields {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 64, message = "Name must be between 1 and 64 characters")
    )]
    name: Option<String>,
    #[validate(
        required(message = "City is required"),
        length(min = 1, max = 64, message = "City must be between 1 and 64 characters")
    )]
    city: Option<String>,
    #[validate(
        required(message = "Age is required"),
        range(min = 0, max = 150, message = "Age must be between 0 and 150")
    )]
    age: Option<i32>,
}

impl CustomerForm {
    pub const FIELDS: [&'static str; 3] = ["name", "city", "age"];

    /// Check every field, reporting the first failing rule of each
    pub fn validated(self, policy: &ValidationPolicy) -> Result<NewCustomer, FieldErrors> {
        let mut errors = FieldErrors::new();

        let age = parse_integer(&mut errors, "age", self.age.as_deref());
        let fields = CustomerFields {
            name: self.name,
            city: self.city,
            age,
        };
        errors.absorb(fields.validate());

        if policy.enforce_charsets {
            errors.check_charset(
                "name",
                fields.name.as_deref(),
                &PLAIN_NAME_CHARSET,
                "Name can only contain letters, spaces, hyphens and dots",
            );
            errors.check_charset(
                "city",
                fields.city.as_deref(),
                &PLAIN_NAME_CHARSET,
                "City can only contain letters, spaces, hyphens and dots",
            );
        }

        match (fields.name, fields.city, fields.age) {
            (Some(name), Some(city), Some(age)) if errors.is_empty() => Ok(NewCustomer { name, city, age }),
            _ => Err(errors.ordered(&Self::FIELDS)),
        }
    }
}
