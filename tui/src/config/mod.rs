mod json;
mod model;

pub use json::load;
pub use model::AppConfig;
