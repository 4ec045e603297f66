//! Server-rendered HTML pages
//!
//! Text read from the database is already HTML-escaped, so it is emitted with
//! `PreEscaped`; maud's own escaping would encode it a second time. Anything
//! taken from the current request (such as a search term) goes through maud's
//! normal escaping.

pub mod books;
pub mod customers;
pub mod loans;

use maud::{html, Markup, PreEscaped, DOCTYPE};

const BOOTSTRAP_CSS: &str = "https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css";
const FONT_AWESOME_CSS: &str = "https://use.fontawesome.com/releases/v5.15.4/css/all.css";

/// Emit stored (already escaped) text
pub(crate) fn stored(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

/// Renders the base HTML document structure
pub(crate) fn layout(title: &str, active: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Shelfmark - " (title) }
                link rel="stylesheet" href=(BOOTSTRAP_CSS);
                link rel="stylesheet" href=(FONT_AWESOME_CSS);
            }
            body {
                (navbar(active))
                main.container."mt-4" {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

fn navbar(active: &str) -> Markup {
    let links = [("books", "Books"), ("customers", "Customers"), ("loans", "Loans")];
    html! {
        nav.navbar.navbar-expand.navbar-dark.bg-dark {
            a.navbar-brand href="/" { i.fas.fa-book {} " Shelfmark" }
            ul.navbar-nav {
                @for (path, label) in links {
                    li.nav-item.active[path == active] {
                        a.nav-link href={ "/" (path) "/" } { (label) }
                    }
                }
            }
        }
    }
}

/// Search box that reflects the current term through maud's escaping
pub(crate) fn search_form(action: &str, search: Option<&str>) -> Markup {
    html! {
        form.form-inline."mb-3" method="get" action=(action) {
            input.form-control."mr-2" type="search" name="search" placeholder="Search by name"
                value=[search];
            button.btn.btn-outline-secondary type="submit" { "Search" }
        }
        @if let Some(term) = search {
            p.text-muted { "Results for \u{201c}" (term) "\u{201d}" }
        }
    }
}

/// Home page
pub fn home() -> Markup {
    layout(
        "Library",
        "",
        html! {
            p.lead { "Manage the catalog, the customers and the loans." }
            div.list-group {
                a.list-group-item.list-group-item-action href="/books/" { i.fas.fa-book {} " Books" }
                a.list-group-item.list-group-item-action href="/customers/" { i.fas.fa-users {} " Customers" }
                a.list-group-item.list-group-item-action href="/loans/" { i.fas.fa-exchange-alt {} " Loans" }
            }
        },
    )
}
