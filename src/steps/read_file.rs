//! ReadFile: a file's decoded contents.

use super::{check_required, parse_inputs, Step, StepError, StepStatus};
use crate::config::{Inputs, ReadFileInputs};
use crate::source;
use serde_json::{Map, Value};

pub struct ReadFile {
    inputs: ReadFileInputs,
    status: StepStatus,
}

impl ReadFile {
    pub fn new(inputs: &Inputs) -> Result<Self, StepError> {
        check_required(Self::NAME, inputs, &["file_path"])?;
        Ok(Self {
            inputs: parse_inputs(Self::NAME, inputs)?,
            status: StepStatus::default(),
        })
    }
}

impl Step for ReadFile {
    const NAME: &'static str = "ReadFile";

    fn run(&mut self) -> Result<Map<String, Value>, StepError> {
        let content = source::read_source(&self.inputs.file_path)?;
        self.status = StepStatus::Completed;

        let mut map = Map::new();
        map.insert(
            "file_path".to_string(),
            Value::String(self.inputs.file_path.display().to_string()),
        );
        map.insert("file_content".to_string(), Value::String(content));
        Ok(map)
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }
}
