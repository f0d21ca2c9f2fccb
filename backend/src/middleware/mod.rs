//! Request pipeline layers, applied by [`crate::server::build_router`].

mod cors;
mod locale;
mod recovery;
mod request_id;
mod timeout;

pub use cors::cors_layer;
pub use locale::detect_locale;
pub use recovery::handle_panic;
pub use request_id::{make_request_span, REQUEST_ID_HEADER};
pub use timeout::enforce_timeout;
