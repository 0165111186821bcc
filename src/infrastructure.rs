pub mod assets;
pub mod email;
pub mod limiter;
pub mod utils;
