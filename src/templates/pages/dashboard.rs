use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub struct DashboardVm {
    pub listing_source: String,
    pub total_listings: i64,
    pub studio_listings: i64,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Dashboard",
        html! {},
        html! {
            main class="container" {
                h1 { "Dashboard" }

                (card("Map", html! {
                    p { "Explore nightclubs, gyms, and BJJ dojos next to studio listings." }
                    a href="/dashboard/map" { "Open the Location Explorer" }
                }))

                (card("Listing table", html! {
                    p { "Apartments imported: " strong { (vm.total_listings) } }
                    p { "Studio listings: " strong { (vm.studio_listings) } }
                    p class="muted" { "Studio layer source: " (vm.listing_source) }
                }))

                (card("Data feeds", html! {
                    ul {
                        li { a href="/api/pois" { "/api/pois" } " (OpenStreetMap via Overpass)" }
                        li { a href="/api/studios" { "/api/studios" } }
                    }
                }))
            }
        },
    )
}
