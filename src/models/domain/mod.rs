pub mod lesson;
pub use lesson::Lesson;
