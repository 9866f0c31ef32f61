pub use dispatch::dispatch;
pub use errors::RouteError;
pub use health_check::health_check;

mod dispatch;
mod errors;
mod health_check;
