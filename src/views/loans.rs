//! Loan pages

use maud::{html, Markup};

use super::{layout, search_form, stored};
use crate::models::{
    book::{Book, BookType},
    loan::Loan,
};

/// Loan list with the creation form; `available` feeds the book picker
pub fn list(loans: &[Loan], available: &[Book], search: Option<&str>) -> Markup {
    layout(
        "Loans",
        "loans",
        html! {
            (search_form("/loans/", search))
            table.table.table-striped {
                thead {
                    tr {
                        th { "#" }
                        th { "Customer" }
                        th { "Book" }
                        th { "Author" }
                        th { "Year" }
                        th { "Loan date" }
                        th { "Return date" }
                        th {}
                    }
                }
                tbody {
                    @for loan in loans {
                        tr data-loan-id=(loan.id) {
                            td { (loan.id) }
                            td { (stored(&loan.customer_name)) }
                            td { (stored(&loan.book_name)) }
                            td { (stored(&loan.original_author)) }
                            td { (loan.original_year_published) }
                            td { (loan.loan_date.to_string()) }
                            td { (loan.return_date.to_string()) }
                            td { (edit_form(loan)) }
                        }
                    }
                }
            }
            @if loans.is_empty() {
                p.text-muted { "No loans found." }
            }
            h2."mt-4" { "Lend a book" }
            @if available.is_empty() {
                p.text-muted { "Every book is currently on loan." }
            } @else {
                form method="post" action="/loans/create" {
                    div.form-group {
                        label for="customer_name" { "Customer Name" }
                        input.form-control id="customer_name" name="customer_name" required maxlength="64";
                    }
                    div.form-group {
                        label for="book_id" { "Book" }
                        select.form-control id="book_id" name="book_id" {
                            @for book in available {
                                option value=(book.id) { (stored(&book.name)) }
                            }
                        }
                    }
                    div.form-group {
                        label for="loan_date" { "Loan Date" }
                        input.form-control id="loan_date" name="loan_date" type="date" required;
                    }
                    div.form-group {
                        label for="return_date" { "Return Date" }
                        input.form-control id="return_date" name="return_date" type="date" required;
                    }
                    button.btn.btn-primary type="submit" { "Create Loan" }
                }
            }
        },
    )
}

/// Inline form prefilled with the stored loan, snapshot included
fn edit_form(loan: &Loan) -> Markup {
    html! {
        details {
            summary { "Edit" }
            form method="post" action={ "/loans/" (loan.id) "/edit" } {
                input.form-control."mb-1" name="customer_name" required maxlength="64"
                    value=(stored(&loan.customer_name));
                input.form-control."mb-1" name="book_name" required maxlength="64" value=(stored(&loan.book_name));
                input.form-control."mb-1" name="loan_date" type="date" required value=(loan.loan_date.to_string());
                input.form-control."mb-1" name="return_date" type="date" required value=(loan.return_date.to_string());
                input.form-control."mb-1" name="original_author" maxlength="64" value=(stored(&loan.original_author));
                input.form-control."mb-1" name="original_year_published" type="number" min="1000" max="2100" required
                    value=(loan.original_year_published);
                select.form-control."mb-1" name="original_book_type" {
                    @for book_type in BookType::ALL {
                        option value=(book_type.as_str()) selected[book_type == loan.original_book_type] {
                            (book_type.label())
                        }
                    }
                }
                button.btn.btn-sm.btn-secondary type="submit" { "Save" }
            }
        }
    }
}
