//! Book pages

use maud::{html, Markup};

use super::{layout, search_form, stored};
use crate::models::book::{Book, BookStatus, BookType};

/// Book list with the creation form
pub fn list(books: &[Book], search: Option<&str>) -> Markup {
    layout(
        "Books",
        "books",
        html! {
            (search_form("/books/", search))
            table.table.table-striped {
                thead {
                    tr {
                        th { "#" }
                        th { "Name" }
                        th { "Author" }
                        th { "Year" }
                        th { "Loan period" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    @for book in books {
                        tr data-book-id=(book.id) {
                            td { (book.id) }
                            td { (stored(&book.name)) }
                            td { (stored(&book.author)) }
                            td { (book.year_published) }
                            td { (book.book_type.label()) }
                            td {
                                @if book.status == BookStatus::Available {
                                    span.badge.badge-success { (book.status.as_str()) }
                                } @else {
                                    span.badge.badge-secondary { (book.status.as_str()) }
                                }
                            }
                            td { (edit_form(book)) }
                        }
                    }
                }
            }
            @if books.is_empty() {
                p.text-muted { "No books found." }
            }
            (create_form())
        },
    )
}

/// Inline form prefilled with the stored values
fn edit_form(book: &Book) -> Markup {
    html! {
        details {
            summary { "Edit" }
            form method="post" action={ "/books/" (book.id) "/edit" } {
                input.form-control."mb-1" name="name" required maxlength="64" value=(stored(&book.name));
                input.form-control."mb-1" name="author" maxlength="64" value=(stored(&book.author));
                input.form-control."mb-1" name="year_published" type="number" min="1000" max="2100" required
                    value=(book.year_published);
                select.form-control."mb-1" name="book_type" {
                    @for book_type in BookType::ALL {
                        option value=(book_type.as_str()) selected[book_type == book.book_type] { (book_type.label()) }
                    }
                }
                button.btn.btn-sm.btn-secondary type="submit" { "Save" }
            }
        }
    }
}

fn create_form() -> Markup {
    html! {
        h2."mt-4" { "Add a book" }
        form method="post" action="/books/create" {
            div.form-group {
                label for="name" { "Book Name" }
                input.form-control id="name" name="name" required maxlength="64";
            }
            div.form-group {
                label for="author" { "Author" }
                input.form-control id="author" name="author" maxlength="64";
            }
            div.form-group {
                label for="year_published" { "Year Published" }
                input.form-control id="year_published" name="year_published" type="number"
                    min="1000" max="2100" required;
            }
            div.form-group {
                label for="book_type" { "Book Type" }
                select.form-control id="book_type" name="book_type" {
                    @for book_type in BookType::ALL {
                        option value=(book_type.as_str()) { (book_type.label()) }
                    }
                }
            }
            button.btn.btn-primary type="submit" { "Create Book" }
        }
    }
}
