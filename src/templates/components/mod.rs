use maud::{html, Markup};

pub mod error;

pub use error::error_page;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            (body)
        }
    }
}

pub fn legend_swatch(color: &str, label: &str) -> Markup {
    html! {
        div class="legend-row" {
            span class="legend-swatch" style=(format!("background:{color}")) {}
            " " (label)
        }
    }
}
