// Client module - SpaceTraders API client
pub mod api;
pub mod backend;
pub mod transport;

pub use api::SpaceTradersClient;
pub use backend::{HttpBackend, HttpRequest, HttpResponse, ReqwestBackend, Sleeper, TokioSleeper};
pub use transport::{ApiRequest, RetryPolicy, Transport, MAX_COOLDOWN_SECONDS};
