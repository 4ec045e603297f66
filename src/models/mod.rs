//! Data models for Shelfmark

pub mod book;
pub mod customer;
pub mod loan;

// Re-export commonly used types
pub use book::{Book, BookStatus, BookType};
pub use customer::Customer;
pub use loan::Loan;
