//! Payslip arithmetic. Pure functions, no I/O.
//!
//! Accumulation runs in full `f64` precision; rounding to centavos happens
//! only at presentation time via [`round_currency`].

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::payslip::{Deductions, WorkEntry};

/// Submitted and computed totals closer than this are considered equal.
const TOTAL_TOLERANCE: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayslipSummary {
    /// quantity × price for each entry, in input order
    pub line_amounts: Vec<f64>,
    pub total_salary: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
}

pub fn line_amount(entry: &WorkEntry) -> f64 {
    f64::from(entry.quantity) * entry.price
}

pub fn total_salary(entries: &[WorkEntry]) -> f64 {
    entries.iter().map(line_amount).sum()
}

pub fn total_deductions(d: &Deductions) -> f64 {
    d.sss_deduction + d.pagibig_deduction + d.philhealth_deduction + d.cash_advance_deduction
}

pub fn net_salary(total_salary: f64, d: &Deductions) -> f64 {
    total_salary - total_deductions(d)
}

pub fn summarize(entries: &[WorkEntry], d: &Deductions) -> PayslipSummary {
    let total = total_salary(entries);
    PayslipSummary {
        line_amounts: entries.iter().map(line_amount).collect(),
        total_salary: total,
        total_deductions: total_deductions(d),
        net_salary: net_salary(total, d),
    }
}

/// Whether a client-supplied total agrees with its own work entries.
pub fn total_matches(submitted: f64, entries: &[WorkEntry]) -> bool {
    (submitted - total_salary(entries)).abs() < TOTAL_TOLERANCE
}

pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
