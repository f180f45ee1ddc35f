pub mod controller;
pub mod routes;

pub use routes::user_routes;
