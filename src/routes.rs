pub use errors::{ResponseBody, RouteError};
pub use health_check::health_check;
pub use method_not_allowed::method_not_allowed;
pub use rate::rate;
pub use subscriptions::{subscribe, FormData};

mod errors;
mod health_check;
mod method_not_allowed;
mod rate;
mod subscriptions;
