use std::fmt;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::services::groundedness_service::{GroundednessCheck, GroundednessVerdict};
use crate::services::model_service::CompletionModel;
use crate::services::pipeline_steps::content_steps;
use crate::services::search_service::SearchProvider;

/// Working record threaded through the pipeline. Each field stays `None`
/// until the stage that owns it has run, and reruns overwrite in place.
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    pub current_segment: String,
    pub research_documents: Option<Vec<String>>,
    pub writer_output: Option<String>,
    pub questions_answers: Option<String>,
    pub test_questions_answers: Option<String>,
}

impl ContentState {
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            current_segment: segment.into(),
            ..Default::default()
        }
    }

    pub fn require_research_documents(&self) -> AppResult<&[String]> {
        self.research_documents
            .as_deref()
            .ok_or_else(|| missing_field("research_documents"))
    }

    pub fn require_writer_output(&self) -> AppResult<&str> {
        self.writer_output
            .as_deref()
            .ok_or_else(|| missing_field("writer_output"))
    }

    pub fn require_questions_answers(&self) -> AppResult<&str> {
        self.questions_answers
            .as_deref()
            .ok_or_else(|| missing_field("questions_answers"))
    }

    pub fn require_test_questions_answers(&self) -> AppResult<&str> {
        self.test_questions_answers
            .as_deref()
            .ok_or_else(|| missing_field("test_questions_answers"))
    }
}

fn missing_field(name: &str) -> AppError {
    AppError::PipelineError(format!("{} read before its stage ran", name))
}

/// Stages of the lesson pipeline, in their forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Research,
    Write,
    Qna,
    Test,
    Done,
}

impl PipelineStage {
    /// Successor stage for this stage's gate outcome. Research has no gate
    /// and always moves forward; Done is terminal.
    pub fn next(self, decision: GateDecision) -> PipelineStage {
        match (self, decision) {
            (PipelineStage::Research, _) => PipelineStage::Write,
            (PipelineStage::Write, GateDecision::Good) => PipelineStage::Qna,
            (PipelineStage::Write, GateDecision::NotGood) => PipelineStage::Research,
            (PipelineStage::Qna, GateDecision::Good) => PipelineStage::Test,
            (PipelineStage::Qna, GateDecision::NotGood) => PipelineStage::Qna,
            (PipelineStage::Test, GateDecision::Good) => PipelineStage::Done,
            (PipelineStage::Test, GateDecision::NotGood) => PipelineStage::Test,
            (PipelineStage::Done, _) => PipelineStage::Done,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Research => "research",
            PipelineStage::Write => "write",
            PipelineStage::Qna => "create_qna",
            PipelineStage::Test => "create_test",
            PipelineStage::Done => "done",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of a quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Good,
    NotGood,
}

impl GateDecision {
    /// An unsure oracle is treated the same as a failing one.
    pub fn from_verdict(verdict: GroundednessVerdict) -> Self {
        match verdict {
            GroundednessVerdict::Grounded => GateDecision::Good,
            GroundednessVerdict::NotGrounded | GroundednessVerdict::NotSure => {
                GateDecision::NotGood
            }
        }
    }
}

/// Finished artifacts of a pipeline run. Constructing one proves every
/// stage produced output; callers never see a partially filled packet.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonPacket {
    pub writer_output: String,
    pub questions_answers: String,
    pub test_questions_answers: String,
}

impl LessonPacket {
    pub fn from_state(state: ContentState) -> AppResult<Self> {
        Ok(Self {
            writer_output: require_artifact(state.writer_output, "writer_output")?,
            questions_answers: require_artifact(state.questions_answers, "questions_answers")?,
            test_questions_answers: require_artifact(
                state.test_questions_answers,
                "test_questions_answers",
            )?,
        })
    }
}

fn require_artifact(field: Option<String>, name: &str) -> AppResult<String> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::PipelineError(format!(
            "pipeline finished without {}",
            name
        ))),
    }
}

/// Answer/context pair the gate after `stage` hands to the oracle.
///
/// The gate after write checks the source segment against the research
/// documents; the later gates check their own output against the explainer.
fn gate_inputs(stage: PipelineStage, state: &ContentState) -> AppResult<(String, String)> {
    match stage {
        PipelineStage::Write => Ok((
            state.current_segment.clone(),
            state.require_research_documents()?.join("\n"),
        )),
        PipelineStage::Qna => Ok((
            state.require_questions_answers()?.to_string(),
            state.require_writer_output()?.to_string(),
        )),
        PipelineStage::Test => Ok((
            state.require_test_questions_answers()?.to_string(),
            state.require_writer_output()?.to_string(),
        )),
        PipelineStage::Research | PipelineStage::Done => Err(AppError::PipelineError(format!(
            "stage {} has no quality gate",
            stage
        ))),
    }
}

/// Drives a segment through research, writing, Q&A, and test creation,
/// rerunning stages whose gate fails until the retry budget runs out.
pub struct ContentPipelineService {
    model: Arc<dyn CompletionModel>,
    search: Arc<dyn SearchProvider>,
    groundedness: Arc<dyn GroundednessCheck>,
    max_gate_retries: u32,
}

impl ContentPipelineService {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        search: Arc<dyn SearchProvider>,
        groundedness: Arc<dyn GroundednessCheck>,
        max_gate_retries: u32,
    ) -> Self {
        Self {
            model,
            search,
            groundedness,
            max_gate_retries,
        }
    }

    pub async fn run(&self, segment: &str) -> AppResult<LessonPacket> {
        let mut state = ContentState::new(segment);
        let mut stage = PipelineStage::Research;
        let mut gate_retries = 0u32;

        log::info!(
            "Starting content pipeline for a {}-byte segment",
            segment.len()
        );

        loop {
            match stage {
                PipelineStage::Research => {
                    content_steps::research(&mut state, self.model.as_ref(), self.search.as_ref())
                        .await?;
                    stage = PipelineStage::Write;
                }
                PipelineStage::Write => {
                    content_steps::write(&mut state, self.model.as_ref()).await?;
                    stage = self
                        .evaluate_gate(PipelineStage::Write, &state, &mut gate_retries)
                        .await?;
                }
                PipelineStage::Qna => {
                    content_steps::create_qna(&mut state, self.model.as_ref()).await?;
                    stage = self
                        .evaluate_gate(PipelineStage::Qna, &state, &mut gate_retries)
                        .await?;
                }
                PipelineStage::Test => {
                    content_steps::create_test(&mut state, self.model.as_ref()).await?;
                    stage = self
                        .evaluate_gate(PipelineStage::Test, &state, &mut gate_retries)
                        .await?;
                }
                PipelineStage::Done => break,
            }
        }

        log::info!("Content pipeline finished");
        LessonPacket::from_state(state)
    }

    async fn evaluate_gate(
        &self,
        stage: PipelineStage,
        state: &ContentState,
        gate_retries: &mut u32,
    ) -> AppResult<PipelineStage> {
        let (answer, context) = gate_inputs(stage, state)?;
        let verdict = self.groundedness.check(&answer, &context).await?;

        match GateDecision::from_verdict(verdict) {
            GateDecision::Good => {
                log::info!("Gate after {} passed", stage);
                *gate_retries = 0;
                Ok(stage.next(GateDecision::Good))
            }
            GateDecision::NotGood if *gate_retries < self.max_gate_retries => {
                *gate_retries += 1;
                let rerun_from = stage.next(GateDecision::NotGood);
                log::info!(
                    "Gate after {} failed, rerunning from {} (retry {}/{})",
                    stage,
                    rerun_from,
                    gate_retries,
                    self.max_gate_retries
                );
                Ok(rerun_from)
            }
            GateDecision::NotGood => {
                log::warn!(
                    "Gate after {} still failing after {} retries, advancing with best effort",
                    stage,
                    self.max_gate_retries
                );
                *gate_retries = 0;
                Ok(stage.next(GateDecision::Good))
            }
        }
    }
}
