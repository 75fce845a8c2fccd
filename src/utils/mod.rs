pub mod eligibility;
pub mod validation;
