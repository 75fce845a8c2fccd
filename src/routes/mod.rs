pub mod auth_route;
pub mod poll_route;
