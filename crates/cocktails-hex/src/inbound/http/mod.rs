mod extract;
mod handlers;
mod server;

pub use extract::ValidatedJson;
pub use handlers::{CreateOrderRequest, CredentialsRequest, LoginResponse, LOGIN_OK};
pub use server::{AppState, HttpServer, HttpServerConfig};
