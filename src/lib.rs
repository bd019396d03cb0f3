pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::advisor;
pub use application::run;
pub use application::tools;
pub use domain::types;
pub use infrastructure::assistants;
pub use infrastructure::server;
