use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;

use crate::model::employee::Employee;
use crate::model::pricing::Category;
use crate::utils::payslip_calc;

/// One line of piece work. Stored inside its payslip, never on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "category": "taklob",
    "subcategory": "molde",
    "size": "S1",
    "quantity": 10,
    "price": 15.0
}))]
pub struct WorkEntry {
    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Size code, or an additional-item code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    pub quantity: u32,

    /// Unit price as resolved by the client
    pub price: f64,
}

impl WorkEntry {
    /// A zero-priced or zero-quantity line cannot be billed.
    pub fn is_billable(&self) -> bool {
        self.quantity > 0 && self.price > 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Deductions {
    #[serde(default)]
    pub sss_deduction: f64,
    #[serde(default)]
    pub pagibig_deduction: f64,
    #[serde(default)]
    pub philhealth_deduction: f64,
    #[serde(default)]
    pub cash_advance_deduction: f64,
}

/// A payslip row as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PayslipRecord {
    pub id: String,
    pub employee_id: String,
    pub period: String,
    pub work_data: Json<Vec<WorkEntry>>,
    #[sqlx(flatten)]
    pub deductions: Deductions,
    pub total_salary: f64,
    pub remaining_advance: f64,
    pub created_at: DateTime<Utc>,
}

/// The employee a payslip points at: the full record when it still exists,
/// otherwise the bare id.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EmployeeRef {
    Resolved(Employee),
    Unresolved(String),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayslipResponse {
    pub id: String,
    pub employee_id: EmployeeRef,
    #[schema(example = "January 2024")]
    pub period: String,
    pub work_data: Vec<WorkEntry>,
    #[serde(flatten)]
    pub deductions: Deductions,
    pub total_salary: f64,
    pub remaining_advance: f64,
    /// Derived on every read: `totalSalary` minus the four deductions
    pub net_salary: f64,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl PayslipResponse {
    pub fn new(record: PayslipRecord, employee: Option<Employee>) -> Self {
        let employee_id = match employee {
            Some(e) => EmployeeRef::Resolved(e),
            None => EmployeeRef::Unresolved(record.employee_id),
        };

        Self {
            id: record.id,
            employee_id,
            period: record.period,
            work_data: record.work_data.0,
            net_salary: payslip_calc::net_salary(record.total_salary, &record.deductions),
            deductions: record.deductions,
            total_salary: record.total_salary,
            remaining_advance: record.remaining_advance,
            created_at: record.created_at,
        }
    }
}
