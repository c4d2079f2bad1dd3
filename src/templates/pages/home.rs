// templates/pages/home.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        html! {},
        html! {
            main class="container" {
                h1 { "Location Explorer" }
                p class="muted" {
                    "Nightclubs, gyms and BJJ academies in downtown Chicago, "
                    "alongside studio apartment listings."
                }

                (card("Get started", html! {
                    p { a href="/dashboard" { "Open the dashboard" } }
                }))
            }
        },
    )
}
