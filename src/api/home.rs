//! Landing page

use maud::Markup;

use crate::views;

pub async fn home_page() -> Markup {
    views::home()
}
