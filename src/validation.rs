use serde::{Deserialize, Serialize};
use std::fmt;

use crate::installment::FinancialComponent;

/// business-rule failure
///
/// Plain data, never raised as a fatal error. Callers receive the complete
/// list of failures for a subject, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// single stateless rule: a predicate plus the error reported when it fails
pub struct ValidationRule<T> {
    check: fn(&T) -> bool,
    error: ValidationError,
}

impl<T> ValidationRule<T> {
    pub fn new(check: fn(&T) -> bool, error: ValidationError) -> Self {
        Self { check, error }
    }

    pub fn passes(&self, subject: &T) -> bool {
        (self.check)(subject)
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }
}

// manual impls keep T free of Clone/Debug bounds; the predicate is a fn pointer
impl<T> Clone for ValidationRule<T> {
    fn clone(&self) -> Self {
        Self {
            check: self.check,
            error: self.error.clone(),
        }
    }
}

impl<T> fmt::Debug for ValidationRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("error", &self.error)
            .finish()
    }
}

/// rule runner that applies every configured rule and aggregates all failures
#[derive(Debug, Clone)]
pub struct ValidationEngine<T> {
    rules: Vec<ValidationRule<T>>,
}

impl<T> ValidationEngine<T> {
    pub fn new(rules: Vec<ValidationRule<T>>) -> Self {
        Self { rules }
    }

    /// validate one subject, collecting every failing rule in rule order
    ///
    /// Never short-circuits and never mutates; the subject is handed back
    /// unchanged on success.
    pub fn validate<'a>(&self, subject: &'a T) -> Result<&'a T, Vec<ValidationError>> {
        let errors: Vec<ValidationError> = self
            .rules
            .iter()
            .filter(|rule| !rule.passes(subject))
            .map(|rule| rule.error().clone())
            .collect();

        if errors.is_empty() {
            Ok(subject)
        } else {
            Err(errors)
        }
    }

    /// validate a sequence of subjects, flattening all failures into one list
    pub fn validate_all<'a, I>(&self, subjects: I) -> Result<(), Vec<ValidationError>>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut errors = Vec::new();
        for subject in subjects {
            if let Err(mut subject_errors) = self.validate(subject) {
                errors.append(&mut subject_errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn rules(&self) -> &[ValidationRule<T>] {
        &self.rules
    }
}

/// reference rule set guarding financial component balances
pub fn component_rules() -> Vec<ValidationRule<FinancialComponent>> {
    vec![
        ValidationRule::new(
            |c: &FinancialComponent| !c.original_amount().is_negative(),
            ValidationError::new("original_amount", "original amount must not be negative"),
        ),
        ValidationRule::new(
            |c: &FinancialComponent| !c.outstanding_balance().is_negative(),
            ValidationError::new(
                "outstanding_balance",
                "outstanding balance must not be negative",
            ),
        ),
        ValidationRule::new(
            |c: &FinancialComponent| c.outstanding_balance() <= c.original_amount(),
            ValidationError::new(
                "outstanding_balance",
                "outstanding balance must not exceed original amount",
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::types::ComponentKind;

    fn engine() -> ValidationEngine<FinancialComponent> {
        ValidationEngine::new(component_rules())
    }

    #[test]
    fn test_valid_component_passes() {
        let component = FinancialComponent::new(ComponentKind::Principal, Money::from_major(100));
        assert!(engine().validate(&component).is_ok());
    }

    #[test]
    fn test_overdrawn_balance_yields_exactly_one_error() {
        let component = FinancialComponent::with_balance(
            ComponentKind::Principal,
            Money::from_major(100),
            Money::from_major(150),
        );

        let errors = engine().validate(&component).unwrap_err();
        // balance >= 0 passes, only the "balance <= original" rule fails
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "outstanding_balance");
        // subject untouched
        assert_eq!(component.outstanding_balance(), Money::from_major(150));
    }

    #[test]
    fn test_all_failures_aggregated_in_rule_order() {
        let component = FinancialComponent::with_balance(
            ComponentKind::Fee,
            Money::from_major(-10),
            Money::from_major(-5),
        );

        let errors = engine().validate(&component).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), "original_amount");
        assert_eq!(errors[1].field(), "outstanding_balance");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let component = FinancialComponent::new(ComponentKind::Interest, Money::from_major(30));
        let engine = engine();

        let first = engine.validate(&component).is_ok();
        let second = engine.validate(&component).is_ok();
        assert!(first && second);
    }

    #[test]
    fn test_validate_all_flattens_across_subjects() {
        let good = FinancialComponent::new(ComponentKind::Principal, Money::from_major(100));
        let bad = FinancialComponent::with_balance(
            ComponentKind::Interest,
            Money::from_major(10),
            Money::from_major(20),
        );

        let errors = engine().validate_all([&good, &bad]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(engine().validate_all([&good]).is_ok());
    }
}
