pub mod lesson_handler;

pub use lesson_handler::{generate_lesson, health_check, health_check_live};
