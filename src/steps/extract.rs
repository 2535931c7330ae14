//! ExtractCodeContexts: walk a tree and emit one record per code region.

use super::{check_required, output, parse_inputs, FileToPatch, Step, StepError, StepStatus};
use crate::config::{ExtractInputs, IgnorePolicy, Inputs};
use crate::filter::PathFilter;
use crate::position::Position;
use crate::resolve::{get_source_code_contexts, ContextOptions};
use crate::source;
use crate::strategy::Grouping;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Resolved regions of one file, with the lines they index into.
#[derive(Debug, Clone)]
pub struct FileContexts {
    pub path: PathBuf,
    pub lines: Vec<String>,
    pub positions: Vec<Position>,
}

impl FileContexts {
    pub fn uri(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct ExtractCodeContexts {
    inputs: ExtractInputs,
    grouping: Grouping,
    policy: IgnorePolicy,
    status: StepStatus,
}

impl ExtractCodeContexts {
    pub fn new(inputs: &Inputs) -> Result<Self, StepError> {
        check_required(Self::NAME, inputs, &[])?;
        Self::from_inputs(parse_inputs(Self::NAME, inputs)?)
    }

    pub fn from_inputs(inputs: ExtractInputs) -> Result<Self, StepError> {
        inputs.validate().map_err(|source| StepError::Validation {
            step: Self::NAME,
            source,
        })?;
        let grouping = inputs
            .context_grouping
            .as_deref()
            .map_or(Grouping::All, Grouping::from_name_lossy);
        Ok(Self {
            inputs,
            grouping,
            policy: IgnorePolicy::default(),
            status: StepStatus::default(),
        })
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_ignore_policy(mut self, policy: IgnorePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    fn options(&self) -> ContextOptions {
        ContextOptions {
            force_code_contexts: self.inputs.force_code_contexts,
            allow_overlap_contexts: self.inputs.allow_overlap_contexts,
        }
    }

    /// Resolve regions for every readable file under the base path.
    ///
    /// Files that cannot be read or decoded are logged and skipped.
    pub fn file_contexts(&self) -> Vec<FileContexts> {
        let filter = PathFilter::new(&self.inputs.base_path, &self.policy, self.inputs.depth_limit());
        let strategies = self.grouping.strategies();
        let options = self.options();

        let mut contexts = Vec::new();
        for path in filter.collect_files() {
            let lines = match source::read_source_lines(&path) {
                Ok(lines) => lines,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping file");
                    continue;
                }
            };
            let positions = get_source_code_contexts(&path, &lines, &strategies, options);
            if positions.is_empty() {
                continue;
            }
            contexts.push(FileContexts {
                path,
                lines,
                positions,
            });
        }
        contexts
    }

    pub fn files_to_patch(&self) -> Vec<FileToPatch> {
        self.file_contexts()
            .iter()
            .flat_map(|file| {
                let uri = file.uri();
                file.positions.iter().map(move |position| {
                    FileToPatch::new(uri.clone(), position.start, position.end)
                        .with_affected_code(position.text(&file.lines))
                })
            })
            .collect()
    }
}

impl Step for ExtractCodeContexts {
    const NAME: &'static str = "ExtractCodeContexts";

    fn run(&mut self) -> Result<Map<String, Value>, StepError> {
        let files_to_patch = self.files_to_patch();
        tracing::info!(
            base_path = %self.inputs.base_path.display(),
            grouping = %self.grouping,
            count = files_to_patch.len(),
            "extracted code contexts"
        );
        self.status = StepStatus::Completed;
        output("files_to_patch", &files_to_patch)
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }
}
