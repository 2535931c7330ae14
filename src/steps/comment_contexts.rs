//! ExtractCodeMethodForCommentContexts: target where each function's doc
//! comment is, or where a new one should go.

use super::extract::ExtractCodeContexts;
use super::{check_required, output, parse_inputs, FileToPatch, Step, StepError, StepStatus};
use crate::config::{ExtractInputs, IgnorePolicy, Inputs};
use crate::lang::DocPlacement;
use crate::position::Position;
use crate::strategy::Grouping;
use serde_json::{Map, Value};

pub struct ExtractCodeMethodForCommentContexts {
    extractor: ExtractCodeContexts,
    status: StepStatus,
}

/// Lines a generated doc comment replaces: the existing comment, or a
/// zero-width insertion point.
fn comment_target(position: &Position) -> (usize, usize) {
    if let Some(comment) = position.comment() {
        return (comment.start, comment.end);
    }
    let body_leading = position
        .language
        .is_some_and(|lang| lang.descriptor().doc_placement == DocPlacement::BodyLeading);
    match position.body() {
        Some(body) if body_leading => (body.start, body.start),
        _ => (position.start, position.start),
    }
}

impl ExtractCodeMethodForCommentContexts {
    pub fn new(inputs: &Inputs) -> Result<Self, StepError> {
        check_required(Self::NAME, inputs, &[])?;
        Self::from_inputs(parse_inputs(Self::NAME, inputs)?)
    }

    /// Any grouping in `inputs` is ignored; functions are always targeted.
    pub fn from_inputs(inputs: ExtractInputs) -> Result<Self, StepError> {
        let extractor = ExtractCodeContexts::from_inputs(ExtractInputs {
            context_grouping: None,
            ..inputs
        })?
        .with_grouping(Grouping::Function);
        Ok(Self {
            extractor,
            status: StepStatus::default(),
        })
    }

    pub fn with_ignore_policy(mut self, policy: IgnorePolicy) -> Self {
        self.extractor = self.extractor.with_ignore_policy(policy);
        self
    }

    pub fn files_to_patch(&self) -> Vec<FileToPatch> {
        let mut records = Vec::new();
        for file in self.extractor.file_contexts() {
            let uri = file.uri();
            for position in &file.positions {
                let (start, end) = comment_target(position);
                let mut record = FileToPatch::new(uri.clone(), start, end)
                    .with_affected_code(position.text(&file.lines));
                if let Some(language) = position.language {
                    record = record.with_comment_format(language.docstring_format());
                }
                records.push(record);
            }
        }
        records
    }
}

impl Step for ExtractCodeMethodForCommentContexts {
    const NAME: &'static str = "ExtractCodeMethodForCommentContexts";

    fn run(&mut self) -> Result<Map<String, Value>, StepError> {
        let files_to_patch = self.files_to_patch();
        tracing::info!(count = files_to_patch.len(), "extracted comment contexts");
        self.status = StepStatus::Completed;
        output("files_to_patch", &files_to_patch)
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }
}
