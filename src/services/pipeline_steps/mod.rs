pub mod content_steps;
