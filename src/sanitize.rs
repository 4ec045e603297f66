//! Write-time HTML escaping of free text
//!
//! Every free-text field is escaped exactly once, right before it is written
//! to the database. Stored text is therefore safe to emit as-is and must never
//! be escaped again on the way out.

use std::ops::Deref;

use crate::models::{
    book::NewBook,
    customer::NewCustomer,
    loan::{BookRef, LoanChanges, NewLoan},
};

/// Escape `& < > " '` as HTML entities, leaving everything else untouched
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A record whose free-text fields have been escaped
///
/// Only [`Sanitize::sanitize`] builds one, and it cannot be sanitized again,
/// so the repository layer, which only accepts `Escaped` records, stores text
/// escaped exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escaped<T>(T);

impl<T> Deref for Escaped<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Records carrying free text that must be escaped before storage
pub trait Sanitize: Sized {
    /// Escape each free-text field in place
    fn escape_fields(self) -> Self;

    fn sanitize(self) -> Escaped<Self> {
        Escaped(self.escape_fields())
    }
}

impl Sanitize for NewBook {
    fn escape_fields(self) -> Self {
        Self {
            name: escape_html(&self.name),
            author: escape_html(&self.author),
            ..self
        }
    }
}

impl Sanitize for NewCustomer {
    fn escape_fields(self) -> Self {
        Self {
            name: escape_html(&self.name),
            city: escape_html(&self.city),
            ..self
        }
    }
}

impl Sanitize for NewLoan {
    fn escape_fields(self) -> Self {
        let book = match self.book {
            BookRef::Name(name) => BookRef::Name(escape_html(&name)),
            other => other,
        };
        Self {
            customer_name: escape_html(&self.customer_name),
            book,
            ..self
        }
    }
}

impl Sanitize for LoanChanges {
    fn escape_fields(self) -> Self {
        Self {
            customer_name: escape_html(&self.customer_name),
            book_name: escape_html(&self.book_name),
            original_author: escape_html(&self.original_author),
            ..self
        }
    }
}
