pub mod dashboard;
pub mod home;
pub mod map;

pub use dashboard::{dashboard_page, DashboardVm};
pub use home::home_page;
pub use map::{map_page, MapVm};
