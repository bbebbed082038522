pub mod login_routes;
pub mod register_routes;
