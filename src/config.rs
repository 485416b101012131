use std::path::PathBuf;

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{FitArgs, PredictArgs};

/// Runtime configuration compiled from CLI input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub dataset: PathBuf,
    pub target: Option<String>,
    pub inputs: Vec<String>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl RunConfig {
    pub fn from_fit_args(args: FitArgs) -> Self {
        Self {
            dataset: args.dataset,
            target: args.target,
            inputs: Vec::new(),
            output: args.output,
            dry_run: args.dry_run,
        }
    }

    pub fn from_predict_args(args: PredictArgs) -> Self {
        Self {
            dataset: args.dataset,
            target: args.target,
            inputs: args.input,
            output: None,
            dry_run: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(target) = &self.target {
            ensure!(
                !target.trim().is_empty(),
                "target column name must not be blank"
            );
        }

        if !self.dry_run && !self.dataset.exists() {
            bail!(
                "Dataset '{}' does not exist; use --dry-run to preview without the file",
                self.dataset.display()
            );
        }

        Ok(())
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Dataset: {}", self.dataset.display()),
            format!(
                "Target: {}",
                self.target.as_deref().unwrap_or("<auto-detect>")
            ),
        ];

        if !self.inputs.is_empty() {
            lines.push(format!("Input: {}", self.inputs.join(", ")));
        }

        if let Some(output) = &self.output {
            lines.push(format!("Output: {}", output.display()));
        }

        if self.dry_run {
            lines.push("Dry run: enabled".to_string());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> RunConfig {
        RunConfig {
            dataset: PathBuf::from("does-not-exist.csv"),
            target: None,
            inputs: Vec::new(),
            output: None,
            dry_run: false,
        }
    }

    #[test]
    fn validate_rejects_missing_dataset() {
        let err = base_config().validate().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn dry_run_skips_dataset_check() {
        let mut config = base_config();
        config.dry_run = true;
        config.validate().expect("dry run should not touch the filesystem");
    }

    #[test]
    fn validate_rejects_blank_target_override() {
        let mut config = base_config();
        config.dry_run = true;
        config.target = Some("  ".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not be blank"));
    }

    #[test]
    fn summary_shows_auto_detect_when_no_target() {
        let config = base_config();
        assert!(config.summary().contains("<auto-detect>"));
    }
}
