//! Draft completeness validation.
//!
//! Pure rules over the draft's stored values; never calls the network.
//! Each offending field or document slot yields exactly one error.

use chrono::NaiveDate;
use strum::IntoEnumIterator;

use crate::config::ValidationPolicy;
use crate::error::FieldError;

use super::model::{DocumentSlot, DraftField, LoanApplicationDraft};

/// Employment statuses that waive the employer and job title fields.
const EXEMPT_EMPLOYMENT_STATUSES: &[&str] = &["unemployed", "student", "retired"];

/// Minimum applicant age in whole years.
const MIN_APPLICANT_AGE: u32 = 18;

/// Date format produced by the form's date input.
const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

fn is_exempt_status(status: &str) -> bool {
    EXEMPT_EMPLOYMENT_STATUSES
        .iter()
        .any(|exempt| status.eq_ignore_ascii_case(exempt))
}

fn required(errors: &mut Vec<FieldError>, field: DraftField) {
    errors.push(FieldError::new(
        field.to_string(),
        format!("{} is required", field.label()),
    ));
}

fn invalid(errors: &mut Vec<FieldError>, field: DraftField, message: impl Into<String>) {
    errors.push(FieldError::new(field.to_string(), message));
}

pub(crate) fn validate_draft(
    draft: &LoanApplicationDraft,
    policy: &ValidationPolicy,
    today: NaiveDate,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    // Plain required string fields
    for field in [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Email,
        DraftField::Phone,
        DraftField::Street,
        DraftField::City,
        DraftField::State,
        DraftField::PostalCode,
        DraftField::LoanPurpose,
        DraftField::EmploymentStatus,
    ] {
        if draft.field(field).is_none() {
            required(&mut errors, field);
        }
    }

    // Loan amount: present, numeric, positive, above the configured floor
    match draft.field(DraftField::LoanAmount) {
        None => required(&mut errors, DraftField::LoanAmount),
        Some(value) => match value.parse::<f64>() {
            Ok(amount) if amount > 0.0 => {
                if let Some(minimum) = policy.minimum_loan_amount
                    && amount < minimum
                {
                    invalid(
                        &mut errors,
                        DraftField::LoanAmount,
                        format!("Loan amount must be at least {minimum}"),
                    );
                }
            }
            _ => invalid(
                &mut errors,
                DraftField::LoanAmount,
                "Please enter a valid loan amount",
            ),
        },
    }

    // Term in months: present, numeric, positive
    match draft.field(DraftField::LoanTermMonths) {
        None => required(&mut errors, DraftField::LoanTermMonths),
        Some(value) => {
            if !value.parse::<f64>().is_ok_and(|term| term > 0.0) {
                invalid(
                    &mut errors,
                    DraftField::LoanTermMonths,
                    "Please enter a valid loan term",
                );
            }
        }
    }

    // Date of birth implies applicant age >= 18
    match draft.field(DraftField::DateOfBirth) {
        None => required(&mut errors, DraftField::DateOfBirth),
        Some(value) => match NaiveDate::parse_from_str(value, DATE_OF_BIRTH_FORMAT) {
            Err(_) => invalid(
                &mut errors,
                DraftField::DateOfBirth,
                "Enter a valid date of birth",
            ),
            Ok(date_of_birth) => {
                let age = today.years_since(date_of_birth);
                if age.is_none_or(|age| age < MIN_APPLICANT_AGE) {
                    invalid(
                        &mut errors,
                        DraftField::DateOfBirth,
                        "You must be at least 18 years old",
                    );
                }
            }
        },
    }

    // Annual income: present, numeric, positive
    match draft.field(DraftField::AnnualIncome) {
        None => required(&mut errors, DraftField::AnnualIncome),
        Some(value) => {
            if !value.parse::<f64>().is_ok_and(|income| income > 0.0) {
                invalid(
                    &mut errors,
                    DraftField::AnnualIncome,
                    "Please enter a valid income amount",
                );
            }
        }
    }

    // Monthly expenses: optional, but must be a non-negative number if given
    if let Some(value) = draft.field(DraftField::MonthlyExpenses)
        && !value.parse::<f64>().is_ok_and(|expenses| expenses >= 0.0)
    {
        invalid(
            &mut errors,
            DraftField::MonthlyExpenses,
            "Please enter a valid expense amount",
        );
    }

    // Credit score: optional, [300, 850] when present
    if let Some(value) = draft.field(DraftField::CreditScore)
        && !value
            .parse::<f64>()
            .is_ok_and(|score| (300.0..=850.0).contains(&score))
    {
        invalid(
            &mut errors,
            DraftField::CreditScore,
            "Credit score must be between 300 and 850",
        );
    }

    // Employer and job title, required only for working applicants
    if let Some(status) = draft.field(DraftField::EmploymentStatus)
        && !is_exempt_status(status)
    {
        if draft.field(DraftField::Employer).is_none() {
            required(&mut errors, DraftField::Employer);
        }
        if draft.field(DraftField::JobTitle).is_none() {
            required(&mut errors, DraftField::JobTitle);
        }
    }

    // Every document slot must be filled
    for slot in DocumentSlot::iter() {
        if draft.document(slot).is_none() {
            errors.push(FieldError::new(
                slot.wire_name(),
                format!("{} is required", slot.label()),
            ));
        }
    }

    errors
}
