//! Loan model and form types
//!
//! A loan keeps its own copy of the book details taken when it was created,
//! so later changes to the book never rewrite lending history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::book::BookType;
use crate::validation::{
    lenient_text, parse_choice, parse_date, parse_id, parse_integer, FieldErrors, ValidationPolicy,
    BOOK_NAME_CHARSET, PLAIN_NAME_CHARSET,
};

/// Loan record as stored; `customer_name`, `book_name` and `original_author`
/// are HTML-escaped
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i64,
    pub customer_name: String,
    pub book_name: String,
    pub loan_date: NaiveDate,
    pub return_date: NaiveDate,
    pub original_author: String,
    pub original_year_published: i32,
    pub original_book_type: BookType,
}

/// Loan form as submitted (JSON or url-encoded)
///
/// Creation reads the customer, the book reference and the dates; the book
/// details are copied from the referenced book. Editing also reads the
/// `original_*` fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoanForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub book_name: Option<String>,
    /// Lend this book instead of looking it up by name
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = Option<i64>)]
    pub book_id: Option<String>,
    /// ISO date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient_text")]
    pub loan_date: Option<String>,
    /// ISO date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient_text")]
    pub return_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub original_author: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = Option<i32>)]
    pub original_year_published: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub original_book_type: Option<String>,
}

/// How a new loan designates its book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookRef {
    Id(i64),
    /// Matched against the stored (escaped) book name
    Name(String),
}

/// Validated loan creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoan {
    pub customer_name: String,
    pub book: BookRef,
    pub loan_date: NaiveDate,
    pub return_date: NaiveDate,
}

/// Validated loan edit data; replaces every stored field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanChanges {
    pub customer_name: String,
    pub book_name: String,
    pub loan_date: NaiveDate,
    pub return_date: NaiveDate,
    pub original_author: String,
    pub original_year_published: i32,
    pub original_book_type: BookType,
}

/// Loan list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoanQuery {
    /// Substring of the customer or book name
    pub search: Option<String>,
}

#[derive(Debug, Validate)]
struct LoanFields {
    #[validate(
        required(message = "Customer name is required"),
        length(min = 1, max = 64, message = "Customer name must be between 1 and 64 characters")
    )]
    customer_name: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Book name must be between 1 and 64 characters"))]
    book_name: Option<String>,
}

#[derive(Debug, Validate)]
struct SnapshotFields {
    #[validate(
        required(message = "Author is required"),
        length(max = 64, message = "Author name must be at most 64 characters")
    )]
    original_author: Option<String>,
    #[validate(
        required(message = "Year is required"),
        range(min = 1000, max = 2100, message = "Year must be between 1000 and 2100")
    )]
    original_year_published: Option<i32>,
}

const BOOK_NAME_REQUIRED: &str = "Book name is required";

impl LoanForm {
    pub const FIELDS: [&'static str; 8] = [
        "customer_name",
        "book_name",
        "book_id",
        "loan_date",
        "return_date",
        "original_author",
        "original_year_published",
        "original_book_type",
    ];

    fn check_names(errors: &mut FieldErrors, fields: &LoanFields, policy: &ValidationPolicy) {
        errors.absorb(fields.validate());
        if policy.enforce_charsets {
            errors.check_charset(
                "customer_name",
                fields.customer_name.as_deref(),
                &PLAIN_NAME_CHARSET,
                "Customer name can only contain letters, spaces, hyphens and dots",
            );
            errors.check_charset(
                "book_name",
                fields.book_name.as_deref(),
                &BOOK_NAME_CHARSET,
                "Book name contains invalid characters",
            );
        }
    }

    /// Validate a loan creation request
    pub fn validated_new(self, policy: &ValidationPolicy) -> Result<NewLoan, FieldErrors> {
        let mut errors = FieldErrors::new();

        let book_id = parse_id(&mut errors, "book_id", self.book_id.as_deref());
        if self.book_id.is_none() && self.book_name.is_none() {
            errors.add("book_name", BOOK_NAME_REQUIRED);
        }
        let fields = LoanFields {
            customer_name: self.customer_name,
            book_name: self.book_name,
        };
        Self::check_names(&mut errors, &fields, policy);

        let loan_date = parse_date(&mut errors, "loan_date", self.loan_date.as_deref(), "Loan date is required");
        let return_date = parse_date(
            &mut errors,
            "return_date",
            self.return_date.as_deref(),
            "Return date is required",
        );

        let book = match (book_id, fields.book_name) {
            (Some(id), _) => Some(BookRef::Id(id)),
            (None, Some(name)) => Some(BookRef::Name(name)),
            (None, None) => None,
        };

        match (fields.customer_name, book, loan_date, return_date) {
            (Some(customer_name), Some(book), Some(loan_date), Some(return_date)) if errors.is_empty() => {
                Ok(NewLoan {
                    customer_name,
                    book,
                    loan_date,
                    return_date,
                })
            }
            _ => Err(errors.ordered(&Self::FIELDS)),
        }
    }

    /// Validate a loan edit request, which carries the full record
    pub fn validated_changes(self, policy: &ValidationPolicy) -> Result<LoanChanges, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.book_name.is_none() {
            errors.add("book_name", BOOK_NAME_REQUIRED);
        }
        let fields = LoanFields {
            customer_name: self.customer_name,
            book_name: self.book_name,
        };
        Self::check_names(&mut errors, &fields, policy);

        let loan_date = parse_date(&mut errors, "loan_date", self.loan_date.as_deref(), "Loan date is required");
        let return_date = parse_date(
            &mut errors,
            "return_date",
            self.return_date.as_deref(),
            "Return date is required",
        );

        let year = parse_integer(
            &mut errors,
            "original_year_published",
            self.original_year_published.as_deref(),
        );
        let snapshot = SnapshotFields {
            original_author: self.original_author,
            original_year_published: year,
        };
        errors.absorb(snapshot.validate());
        if policy.enforce_charsets {
            errors.check_charset(
                "original_author",
                snapshot.original_author.as_deref(),
                &PLAIN_NAME_CHARSET,
                "Author name can only contain letters, spaces, hyphens and dots",
            );
        }
        let book_type = parse_choice::<BookType>(
            &mut errors,
            "original_book_type",
            self.original_book_type.as_deref(),
            "Book type is required",
        );

        match (
            fields.customer_name,
            fields.book_name,
            loan_date,
            return_date,
            snapshot.original_author,
            snapshot.original_year_published,
            book_type,
        ) {
            (
                Some(customer_name),
                Some(book_name),
                Some(loan_date),
                Some(return_date),
                Some(original_author),
                Some(original_year_published),
                Some(original_book_type),
            ) if errors.is_empty() => Ok(LoanChanges {
                customer_name,
                book_name,
                loan_date,
                return_date,
                original_author,
                original_year_published,
                original_book_type,
            }),
            _ => Err(errors.ordered(&Self::FIELDS)),
        }
    }
}
