use std::fmt;

use serde::{Deserialize, Serialize};

use super::expr::{ExpressionError, Value};

/// The four possible results of checking a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The rule evaluated to `true`.
    Success,
    /// The rule evaluated to `false`.
    Failed,
    /// The rule could not be evaluated or produced a non-boolean.
    Error,
    /// The rule evaluated to `null`.
    Unapplicable,
}

impl Outcome {
    /// Stable code, e.g. `"SUCCESS"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
            Self::Unapplicable => "UNAPPLICABLE",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An [`Outcome`] with a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    outcome: Outcome,
    description: String,
}

impl RuleOutcome {
    pub const SUCCESS_DESCRIPTION: &'static str = "Rule successfully validated";
    pub const FAILED_DESCRIPTION: &'static str = "Rule has failed";
    pub const UNAPPLICABLE_DESCRIPTION: &'static str = "Rule is unapplicable";
    /// Prefix of every ERROR description; the cause follows.
    pub const ERROR_PREFIX: &'static str = "Error in the rule: ";

    pub fn success() -> Self {
        Self::fixed(Outcome::Success, Self::SUCCESS_DESCRIPTION)
    }

    pub fn failed() -> Self {
        Self::fixed(Outcome::Failed, Self::FAILED_DESCRIPTION)
    }

    pub fn unapplicable() -> Self {
        Self::fixed(Outcome::Unapplicable, Self::UNAPPLICABLE_DESCRIPTION)
    }

    pub fn error(cause: impl fmt::Display) -> Self {
        Self {
            outcome: Outcome::Error,
            description: format!("{}{cause}", Self::ERROR_PREFIX),
        }
    }

    fn fixed(outcome: Outcome, description: &str) -> Self {
        Self {
            outcome,
            description: description.to_string(),
        }
    }

    /// Classify an evaluation result: `true`, `false`, and `null` map to
    /// SUCCESS, FAILED, and UNAPPLICABLE; anything else is an ERROR.
    pub fn from_evaluation(result: Result<Value<'_>, ExpressionError>) -> Self {
        match result {
            Ok(Value::Bool(true)) => Self::success(),
            Ok(Value::Bool(false)) => Self::failed(),
            Ok(Value::Null) => Self::unapplicable(),
            Ok(other) => Self::error(ExpressionError::TypeMismatch {
                expected: "boolean",
                found: other.type_name(),
            }),
            Err(err) => Self::error(err),
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.outcome, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(Outcome::Success.code(), "SUCCESS");
        assert_eq!(Outcome::Failed.code(), "FAILED");
        assert_eq!(Outcome::Error.code(), "ERROR");
        assert_eq!(Outcome::Unapplicable.code(), "UNAPPLICABLE");
        assert_eq!(Outcome::Unapplicable.to_string(), "UNAPPLICABLE");
    }

    #[test]
    fn classification() {
        assert_eq!(
            RuleOutcome::from_evaluation(Ok(Value::Bool(true))),
            RuleOutcome::success()
        );
        assert_eq!(
            RuleOutcome::from_evaluation(Ok(Value::Bool(false))).description(),
            "Rule has failed"
        );
        assert_eq!(
            RuleOutcome::from_evaluation(Ok(Value::Null)).outcome(),
            Outcome::Unapplicable
        );

        let wrong_type = RuleOutcome::from_evaluation(Ok(Value::Str("test".into())));
        assert_eq!(wrong_type.outcome(), Outcome::Error);
        assert_eq!(
            wrong_type.description(),
            "Error in the rule: expected boolean, found string"
        );
    }

    #[test]
    fn errors_carry_cause() {
        let outcome = RuleOutcome::from_evaluation(Err(ExpressionError::IndexOutOfBounds {
            index: 0,
            len: 0,
        }));
        assert_eq!(outcome.outcome(), Outcome::Error);
        assert!(outcome.description().starts_with(RuleOutcome::ERROR_PREFIX));
        assert!(outcome.description().ends_with("index 0 out of range for length 0"));
    }

    #[test]
    fn serializes_outcome_code() {
        let json = serde_json::to_string(&RuleOutcome::success()).unwrap();
        assert_eq!(
            json,
            r#"{"outcome":"SUCCESS","description":"Rule successfully validated"}"#
        );
    }
}
