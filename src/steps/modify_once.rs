//! ModifyCodeOnce: one edit given directly as inputs.

use super::{
    check_required, parse_inputs, ExtractedResponse, FileToPatch, ModifiedCodeFile, ModifyCode,
    Step, StepError, StepStatus,
};
use crate::config::{Inputs, ModifyOnceInputs};
use serde_json::{Map, Value};

pub struct ModifyCodeOnce {
    inputs: ModifyOnceInputs,
    status: StepStatus,
}

impl ModifyCodeOnce {
    pub fn new(inputs: &Inputs) -> Result<Self, StepError> {
        check_required(Self::NAME, inputs, &["file_path"])?;
        let parsed: ModifyOnceInputs = parse_inputs(Self::NAME, inputs)?;
        parsed.validate().map_err(|source| StepError::Validation {
            step: Self::NAME,
            source,
        })?;
        Ok(Self {
            inputs: parsed,
            status: StepStatus::default(),
        })
    }

    pub fn apply(&mut self) -> Result<Option<ModifiedCodeFile>, StepError> {
        let Some(new_code) = self.inputs.new_code.clone() else {
            self.status = StepStatus::Skipped {
                reason: "No patch provided".to_string(),
            };
            return Ok(None);
        };

        let target = FileToPatch {
            start_line: self.inputs.start_line,
            end_line: self.inputs.end_line,
            ..FileToPatch::new(self.inputs.file_path.clone(), 0, 0)
        };
        let mut modify = ModifyCode::from_records(vec![target], vec![ExtractedResponse::with_patch(new_code)]);
        let modified = modify.apply()?;
        self.status = modify.status().clone();
        Ok(modified.into_iter().next())
    }
}

impl Step for ModifyCodeOnce {
    const NAME: &'static str = "ModifyCodeOnce";

    fn run(&mut self) -> Result<Map<String, Value>, StepError> {
        let Some(modified) = self.apply()? else {
            return Ok(Map::new());
        };
        match serde_json::to_value(modified).map_err(StepError::Output)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    fn status(&self) -> &StepStatus {
        &self.status
    }
}
