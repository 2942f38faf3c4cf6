pub mod prompts;
pub mod test_prompt;
