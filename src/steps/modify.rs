//! ModifyCode: splice extracted responses back into their files.

use super::{
    check_required, output, parse_inputs, ExtractedResponse, FileToPatch, ModifiedCodeFile, Step,
    StepError, StepStatus,
};
use crate::config::Inputs;
use crate::splice::{sort_bottom_up, LineEdit};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const FILES_TO_PATCH: &str = "files_to_patch";
pub const EXTRACTED_RESPONSES: &str = "extracted_responses";

#[derive(Debug, Deserialize)]
struct ModifyInputs {
    files_to_patch: Vec<FileToPatch>,
    extracted_responses: Vec<ExtractedResponse>,
}

pub struct ModifyCode {
    pairs: Vec<(FileToPatch, ExtractedResponse)>,
    status: StepStatus,
}

impl ModifyCode {
    pub fn new(inputs: &Inputs) -> Result<Self, StepError> {
        check_required(Self::NAME, inputs, &[FILES_TO_PATCH, EXTRACTED_RESPONSES])?;
        let parsed: ModifyInputs = parse_inputs(Self::NAME, inputs)?;
        Ok(Self::from_records(parsed.files_to_patch, parsed.extracted_responses))
    }

    /// Pair records by index; surplus entries on either side are dropped.
    pub fn from_records(files_to_patch: Vec<FileToPatch>, responses: Vec<ExtractedResponse>) -> Self {
        if files_to_patch.len() != responses.len() {
            tracing::warn!(
                files = files_to_patch.len(),
                responses = responses.len(),
                "files_to_patch and extracted_responses differ in length"
            );
        }
        Self {
            pairs: files_to_patch.into_iter().zip(responses).collect(),
            status: StepStatus::default(),
        }
    }

    /// Apply every edit that carries a patch, bottom-up.
    pub fn apply(&mut self) -> Result<Vec<ModifiedCodeFile>, StepError> {
        let mut pairs = self.pairs.clone();
        sort_bottom_up(&mut pairs, |(target, _)| target.start_line);

        if pairs.is_empty() {
            self.status = StepStatus::Skipped {
                reason: "No code snippets to modify.".to_string(),
            };
            return Ok(Vec::new());
        }
        self.status = StepStatus::Completed;

        let (edits, modified): (Vec<_>, Vec<_>) = pairs
            .iter()
            .filter_map(|(target, response)| {
                let patch = response.patch.as_deref()?;
                let edit = LineEdit::new(&target.uri, target.start_line, target.end_line, patch);
                Some((edit, ModifiedCodeFile::new(target, response)))
            })
            .unzip();
        LineEdit::apply_batch(edits)?;

        tracing::info!(count = modified.len(), "applied code modifications");
        Ok(modified)
    }
}

impl Step for ModifyCode {
    const NAME: &'static str = "ModifyCode";

    fn run(&mut self) -> Result<Map<String, Value>, StepError> {
        let modified = self.apply()?;
        output("modified_code_files", &modified)
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }
}
