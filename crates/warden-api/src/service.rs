//! # Greeting Service
//!
//! Domain layer behind the greeting and score endpoints. Method
//! arguments are checked against the registry before the body runs, and
//! return values are checked after it, mirroring contract enforcement
//! at method boundaries rather than at the HTTP edge.

use serde_json::{json, Value};

use warden_core::{ConstraintViolationError, ViolationOrigin};
use warden_engine::{EngineError, Validator};

/// Errors raised by service methods: either a contract failure or an
/// engine fault.
#[derive(Debug)]
pub enum ServiceError {
    Violation(ConstraintViolationError),
    Engine(EngineError),
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

/// Greets callers by name and normalizes scores. Both methods carry
/// registry-declared contracts.
#[derive(Debug, Clone)]
pub struct GreetingService {
    validator: Validator,
}

impl GreetingService {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// Build a greeting. The `name` parameter is declared `not_null`,
    /// so passing `None` is a precondition failure, not a user error.
    pub fn greeting(&self, name: Option<&str>) -> Result<String, ServiceError> {
        let value = match name {
            Some(n) => Value::String(n.to_string()),
            None => Value::Null,
        };
        let violations = self.validator.validate_parameter("greeting", "name", &value)?;
        if !violations.is_empty() {
            return Err(ServiceError::Violation(ConstraintViolationError::new(
                ViolationOrigin::MethodPrecondition,
                violations,
            )));
        }
        // Checked non-null above.
        Ok(format!("hello {}", name.unwrap_or_default()))
    }

    /// Scale a score to its normalized form. The return value is
    /// declared `digits(3, 0)`, so large inputs violate the contract
    /// after the computation has already run.
    pub fn normalized_score(&self, score: i64) -> Result<i64, ServiceError> {
        let normalized = score.saturating_mul(100);
        let violations = self
            .validator
            .validate_return("normalized_score", &json!(normalized))?;
        if !violations.is_empty() {
            return Err(ServiceError::Violation(ConstraintViolationError::new(
                ViolationOrigin::ReturnValue,
                violations,
            )));
        }
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap;
    use warden_core::ErrorCategory;

    fn service() -> GreetingService {
        let validator = bootstrap::validator().unwrap();
        GreetingService::new(validator)
    }

    #[test]
    fn greeting_with_name_succeeds() {
        assert_eq!(service().greeting(Some("world")).unwrap(), "hello world");
    }

    #[test]
    fn greeting_without_name_is_a_precondition_failure() {
        let err = service().greeting(None).unwrap_err();
        match err {
            ServiceError::Violation(v) => {
                assert_eq!(v.origin, ViolationOrigin::MethodPrecondition);
                assert_eq!(v.category(), ErrorCategory::InternalError);
                assert_eq!(
                    v.violations.to_string(),
                    "failed: greeting.name (must not be null)"
                );
            }
            ServiceError::Engine(e) => panic!("unexpected engine fault: {e}"),
        }
    }

    #[test]
    fn small_score_normalizes() {
        assert_eq!(service().normalized_score(9).unwrap(), 900);
    }

    #[test]
    fn large_score_violates_the_return_contract() {
        let err = service().normalized_score(42).unwrap_err();
        match err {
            ServiceError::Violation(v) => {
                assert_eq!(v.origin, ViolationOrigin::ReturnValue);
                assert_eq!(
                    v.violations.to_string(),
                    "failed: normalized_score.<return value> \
                     (numeric value out of bounds (<3 digits>.<0 digits> expected))"
                );
            }
            ServiceError::Engine(e) => panic!("unexpected engine fault: {e}"),
        }
    }
}
