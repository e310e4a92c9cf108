pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod celebration;
pub mod config;
pub mod error;
pub mod logging;
pub mod quiz;
pub mod router;
pub mod runtime;
pub mod session;
pub mod sound;
pub mod speech;
pub mod ui;
pub mod util;

pub use app::App;
pub use catalog::Catalog;
pub use error::QuizError;
pub use quiz::{Quiz, QuizStatus};
pub use router::{Router, Screen};
pub use session::{Summary, WordResult};
