pub mod calculator;
pub mod display;
pub mod error;
pub mod input;
pub mod types;
pub mod validation;

pub use calculator::{analyze_mortgage, calculate, MortgageSummary};
pub use error::MortgageError;
pub use input::{FieldInput, LoanField, LoanInputs, RawLoanInputs};
pub use types::*;
pub use validation::{validate, ValidationResult};

/// Standard result type for all mortgage-calc operations
pub type MortgageResult<T> = Result<T, MortgageError>;
