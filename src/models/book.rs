//! Book model and form types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validation::{
    lenient_text, parse_choice, parse_integer, FieldErrors, ValidationPolicy, BOOK_NAME_CHARSET,
    PLAIN_NAME_CHARSET,
};

/// Lending period category of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum BookType {
    #[serde(rename = "2days")]
    #[sqlx(rename = "2days")]
    TwoDays,
    #[serde(rename = "5days")]
    #[sqlx(rename = "5days")]
    FiveDays,
    #[serde(rename = "10days")]
    #[sqlx(rename = "10days")]
    TenDays,
}

impl BookType {
    pub const ALL: [BookType; 3] = [BookType::TwoDays, BookType::FiveDays, BookType::TenDays];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::TwoDays => "2days",
            BookType::FiveDays => "5days",
            BookType::TenDays => "10days",
        }
    }

    /// Human readable label used on the HTML pages
    pub fn label(&self) -> &'static str {
        match self {
            BookType::TwoDays => "Up to 2 days",
            BookType::FiveDays => "Up to 5 days",
            BookType::TenDays => "Up to 10 days",
        }
    }
}

impl std::fmt::Display for BookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2days" => Ok(BookType::TwoDays),
            "5days" => Ok(BookType::FiveDays),
            "10days" => Ok(BookType::TenDays),
            other => Err(format!("unknown book type '{}'", other)),
        }
    }
}

/// Whether a book can currently be lent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Available,
    Unavailable,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Unavailable => "unavailable",
        }
    }
}

/// Book record as stored; `name` and `author` are HTML-escaped
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub year_published: i32,
    pub book_type: BookType,
    pub status: BookStatus,
}

/// Book form as submitted (JSON or url-encoded)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: Option<String>,
    /// Year of publication, 1000 to 2100
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = Option<i32>)]
    pub year_published: Option<String>,
    /// One of `2days`, `5days`, `10days`
    #[serde(default, deserialize_with = "lenient_text")]
    pub book_type: Option<String>,
}

/// Validated book data, ready to be escaped and stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub author: String,
    pub year_published: i32,
    pub book_type: BookType,
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Substring of the book name
    pub search: Option<String>,
}

#[derive(Debug, Validate)]
struct BookFields {
    #[validate(
        required(message = "Book name is required"),
        length(min = 1, max = 64, message = "Book name must be between 1 and 64 characters")
    )]
    name: Option<String>,
    #[validate(length(max = 64, message = "Author name must be at most 64 characters"))]
    author: Option<String>,
    #[validate(
        required(message = "Year is required"),
        range(min = 1000, max = 2100, message = "Year must be between 1000 and 2100")
    )]
    year_published: Option<i32>,
}

impl BookForm {
    pub const FIELDS: [&'static str; 4] = ["name", "author", "year_published", "book_type"];

    /// Check every field, reporting the first failing rule of each
    pub fn validated(self, policy: &ValidationPolicy) -> Result<NewBook, FieldErrors> {
        let mut errors = FieldErrors::new();

        let year_published = parse_integer(&mut errors, "year_published", self.year_published.as_deref());
        let fields = BookFields {
            name: self.name,
            author: self.author,
            year_published,
        };
        errors.absorb(fields.validate());

        if policy.enforce_charsets {
            errors.check_charset(
                "name",
                fields.name.as_deref(),
                &BOOK_NAME_CHARSET,
                "Book name contains invalid characters",
            );
            errors.check_charset(
                "author",
                Some(fields.author.as_deref().unwrap_or_default()),
                &PLAIN_NAME_CHARSET,
                "Author name can only contain letters, spaces, hyphens and dots",
            );
        }

        let book_type = parse_choice::<BookType>(
            &mut errors,
            "book_type",
            self.book_type.as_deref(),
            "Book type is required",
        );

        match (fields.name, fields.year_published, book_type) {
            (Some(name), Some(year_published), Some(book_type)) if errors.is_empty() => Ok(NewBook {
                name,
                author: fields.author.unwrap_or_default(),
                year_published,
                book_type,
            }),
            _ => Err(errors.ordered(&Self::FIELDS)),
        }
    }
}
