pub mod cookie_utils;
pub mod crypto;
pub mod html;
pub mod logging;
pub mod responses;

pub use html::escape_html;
pub use logging::LoggingHelper;
pub use responses::ResponseBuilder;
