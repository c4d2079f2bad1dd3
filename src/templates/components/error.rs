use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Full error page, used for every non-API failure.
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {},
        html! {
            main class="container" {
                h1 { "Error " (status) }
                p class="muted" { (message) }
                p { a href="/" { "← Back to home" } }
            }
        },
    )
}
