use std::collections::HashSet;

use futures::future::try_join_all;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{prompts, test_prompt::TEST_PROMPT};
use crate::errors::{AppError, AppResult};
use crate::services::content_pipeline_service::ContentState;
use crate::services::model_service::CompletionModel;
use crate::services::search_service::{SearchProvider, SearchResult};

static LIST_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*+]|\d+[.)])\s+").expect("valid list prefix pattern"));

static TEST_QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*Test Question (\d+):").expect("valid question pattern"));

static TEST_ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*Test Answer (\d+):").expect("valid answer pattern"));

/// Turns the segment into web-search queries, fans the searches out
/// concurrently, and stores the deduplicated snippet contents as one blob.
pub async fn research(
    state: &mut ContentState,
    model: &dyn CompletionModel,
    search: &dyn SearchProvider,
) -> AppResult<()> {
    let user_prompt = format!(
        "Here is the paragraph of text: \n\n {} \n Formulate a set of web search queries",
        state.current_segment
    );
    let reply = model
        .complete(prompts::RESEARCH_QUERY_PROMPT, &user_prompt)
        .await?;

    let queries = parse_queries(&reply);
    if queries.is_empty() {
        return Err(AppError::ModelError(
            "query generation produced no usable queries".to_string(),
        ));
    }
    log::info!("Research stage issuing {} web searches", queries.len());

    let batches = try_join_all(queries.iter().map(|query| search.search(query))).await?;
    let documents = unique_union(batches);
    log::debug!("Research stage kept {} unique documents", documents.len());

    let blob = documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    state.research_documents = Some(vec![blob]);
    Ok(())
}

/// Produces the explainer from the segment and the research blob.
pub async fn write(state: &mut ContentState, model: &dyn CompletionModel) -> AppResult<()> {
    let user_prompt = format!(
        "Here is the paragraph of text: \n\n {} \nAnd the web search results: \n\n {} \n",
        state.current_segment,
        state.require_research_documents()?.join("\n")
    );
    let content = model.complete(prompts::WRITER_PROMPT, &user_prompt).await?;

    state.writer_output = Some(require_non_empty(content, "writer")?);
    Ok(())
}

/// Produces the question/answer set from the segment and the explainer.
pub async fn create_qna(state: &mut ContentState, model: &dyn CompletionModel) -> AppResult<()> {
    let user_prompt = format!(
        "Here is the paragraph of text: \n\n {} \nAnd the content: \n\n {} \n",
        state.current_segment,
        state.require_writer_output()?
    );
    let qna = model.complete(prompts::QNA_PROMPT, &user_prompt).await?;

    state.questions_answers = Some(require_non_empty(qna, "qna")?);
    Ok(())
}

/// Produces the formatted test from the segment and the explainer.
pub async fn create_test(state: &mut ContentState, model: &dyn CompletionModel) -> AppResult<()> {
    let user_prompt = format!(
        "Here is the paragraph of text: \n\n {} \nAnd the content: \n\n {} \n",
        state.current_segment,
        state.require_writer_output()?
    );
    let test = model.complete(TEST_PROMPT, &user_prompt).await?;
    let test = require_non_empty(test, "test")?;

    match validate_test_layout(&test) {
        Ok(count) => log::debug!("Test stage produced {} well-formed questions", count),
        Err(deviation) => log::warn!("Test stage layout deviates: {}", deviation),
    }

    state.test_questions_answers = Some(test);
    Ok(())
}

fn require_non_empty(content: String, stage: &str) -> AppResult<String> {
    if content.trim().is_empty() {
        return Err(AppError::ModelError(format!(
            "{} stage returned an empty completion",
            stage
        )));
    }
    Ok(content)
}

/// One query per line; markdown list prefixes and wrapping quotes are
/// stripped because models add them despite instructions.
fn parse_queries(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(|line| LIST_PREFIX_RE.replace(line.trim(), "").into_owned())
        .map(|line| line.trim_matches('"').trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Set-union of all result batches, where two results are the same
/// document when their entire serialized form is equal.
fn unique_union(batches: Vec<Vec<SearchResult>>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for result in batches.into_iter().flatten() {
        let key = serde_json::to_string(&result).unwrap_or_default();
        if seen.insert(key) {
            unique.push(result);
        }
    }

    unique
}

/// Checks the `Test Question N:` / `Test Answer N:` layout: equal counts,
/// both numbered 1..=N with no gaps. Returns the question count.
fn validate_test_layout(test: &str) -> Result<usize, String> {
    let questions = numbered_labels(&TEST_QUESTION_RE, test);
    let answers = numbered_labels(&TEST_ANSWER_RE, test);

    if questions.is_empty() {
        return Err("no 'Test Question N:' lines found".to_string());
    }
    if questions.len() != answers.len() {
        return Err(format!(
            "{} questions but {} answers",
            questions.len(),
            answers.len()
        ));
    }

    for (labels, what) in [(&questions, "question"), (&answers, "answer")] {
        for (index, number) in labels.iter().enumerate() {
            let expected = index + 1;
            if *number != expected {
                return Err(format!(
                    "{} numbering jumps to {} where {} was expected",
                    what, number, expected
                ));
            }
        }
    }

    Ok(questions.len())
}

fn numbered_labels(pattern: &Regex, test: &str) -> Vec<usize> {
    pattern
        .captures_iter(test)
        .filter_map(|captures| captures[1].parse().ok())
        .collect()
}
