mod handlers;
mod routes;

pub use handlers::{health, send_push, service_worker, stats, HealthResponse, StatsResponse};
pub use routes::api_routes;
