pub mod errors;
pub mod types;

pub use errors::{ConfigError, ShimError, WebViewError};
pub use types::{Color, Position, Size};

pub type Result<T> = std::result::Result<T, ShimError>;
