pub mod games;
pub mod handlers;
pub mod middleware;
pub mod music;
pub mod routes;
pub mod videos;

pub use routes::create_router;
