use crate::{
    api::employee::{find_employee, find_employees},
    error::ApiError,
    model::payslip::{Deductions, PayslipRecord, PayslipResponse, WorkEntry},
    utils::{
        payslip_calc,
        validation::{non_negative, required_amount, required_text},
    },
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use futures_util::TryStreamExt;
use serde::Deserialize;
use sqlx::{SqlitePool, types::Json};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "employeeId": "5f0c2d1e-8a4b-4c3d-9e2f-1a2b3c4d5e6f",
    "period": "January 2024",
    "workData": [
        { "category": "taklob", "subcategory": "molde", "size": "S1", "quantity": 10, "price": 15 }
    ],
    "sssDeduction": 0,
    "pagibigDeduction": 0,
    "philhealthDeduction": 0,
    "cashAdvanceDeduction": 0,
    "totalSalary": 150,
    "remainingAdvance": 0
}))]
pub struct CreatePayslip {
    #[schema(value_type = String)]
    pub employee_id: Option<String>,
    #[schema(value_type = String)]
    pub period: Option<String>,
    #[serde(default)]
    pub work_data: Vec<WorkEntry>,
    #[schema(value_type = f64)]
    pub sss_deduction: Option<f64>,
    #[schema(value_type = f64)]
    pub pagibig_deduction: Option<f64>,
    #[schema(value_type = f64)]
    pub philhealth_deduction: Option<f64>,
    #[serde(default)]
    pub cash_advance_deduction: f64,
    /// Trusted as submitted; never recomputed from `workData`
    #[schema(value_type = f64)]
    pub total_salary: Option<f64>,
    #[serde(default)]
    pub remaining_advance: f64,
}

impl CreatePayslip {
    fn into_record(self) -> Result<PayslipRecord, ApiError> {
        check_work_entries(&self.work_data)?;

        let amount = |field: &str, value: Option<f64>| {
            required_amount(field, value).and_then(|v| non_negative(field, v))
        };

        Ok(PayslipRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: required_text("employeeId", self.employee_id)?,
            period: required_text("period", self.period)?,
            deductions: Deductions {
                sss_deduction: amount("sssDeduction", self.sss_deduction)?,
                pagibig_deduction: amount("pagibigDeduction", self.pagibig_deduction)?,
                philhealth_deduction: amount("philhealthDeduction", self.philhealth_deduction)?,
                cash_advance_deduction: non_negative(
                    "cashAdvanceDeduction",
                    self.cash_advance_deduction,
                )?,
            },
            total_salary: amount("totalSalary", self.total_salary)?,
            remaining_advance: non_negative("remainingAdvance", self.remaining_advance)?,
            work_data: Json(self.work_data),
            created_at: Utc::now(),
        })
    }
}

/// Quantities must be positive and unit prices non-negative. The price value
/// itself is kept as submitted.
fn check_work_entries(entries: &[WorkEntry]) -> Result<(), ApiError> {
    for (i, entry) in entries.iter().enumerate() {
        if entry.quantity == 0 {
            return Err(ApiError::validation(format!(
                "workData[{i}].quantity must be positive"
            )));
        }
        non_negative(&format!("workData[{i}].price"), entry.price)?;
    }
    Ok(())
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPayslip {
    #[serde(default)]
    pub work_data: Vec<WorkEntry>,
    #[serde(flatten)]
    pub deductions: Deductions,
}

/// Create Payslip
///
/// Stores the payslip exactly as submitted. The employee reference is not
/// checked and `totalSalary` is not recomputed; a total that disagrees with
/// the work entries is only logged.
#[utoipa::path(
    post,
    path = "/api/payslips",
    request_body = CreatePayslip,
    responses(
        (status = 201, description = "Payslip created", body = PayslipResponse),
        (status = 400, description = "Missing or invalid field", body = Object, example = json!({
            "error": "period is required"
        }))
    ),
    tag = "Payslip"
)]
pub async fn create_payslip(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreatePayslip>,
) -> Result<HttpResponse, ApiError> {
    let record = payload.into_inner().into_record()?;

    if !payslip_calc::total_matches(record.total_salary, &record.work_data) {
        warn!(
            payslip_id = %record.id,
            submitted = record.total_salary,
            computed = payslip_calc::total_salary(&record.work_data),
            "totalSalary disagrees with work entries; storing submitted value"
        );
    }

    sqlx::query(
        r#"
        INSERT INTO payslips
        (id, employee_id, period, work_data,
         sss_deduction, pagibig_deduction, philhealth_deduction, cash_advance_deduction,
         total_salary, remaining_advance, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.employee_id)
    .bind(&record.period)
    .bind(&record.work_data)
    .bind(record.deductions.sss_deduction)
    .bind(record.deductions.pagibig_deduction)
    .bind(record.deductions.philhealth_deduction)
    .bind(record.deductions.cash_advance_deduction)
    .bind(record.total_salary)
    .bind(record.remaining_advance)
    .bind(record.created_at)
    .execute(pool.get_ref())
    .await?;

    info!(payslip_id = %record.id, employee_id = %record.employee_id, "Payslip created");

    let employee = find_employee(pool.get_ref(), &record.employee_id).await?;
    Ok(HttpResponse::Created().json(PayslipResponse::new(record, employee)))
}

#[utoipa::path(
    get,
    path = "/api/payslips",
    responses(
        (status = 200, description = "All payslips, newest first, employee expanded", body = [PayslipResponse])
    ),
    tag = "Payslip"
)]
pub async fn list_payslips(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let mut stream = sqlx::query_as::<_, PayslipRecord>(
        "SELECT * FROM payslips ORDER BY created_at DESC, rowid DESC",
    )
    .fetch(pool.get_ref());

    let mut records = Vec::new();
    let mut employee_ids = BTreeSet::new();

    while let Some(record) = stream.try_next().await? {
        employee_ids.insert(record.employee_id.clone());
        records.push(record);
    }
    drop(stream);

    let employee_ids: Vec<String> = employee_ids.into_iter().collect();
    let employees = find_employees(pool.get_ref(), &employee_ids).await?;
    debug!(
        payslips = records.len(),
        resolved = employees.len(),
        "Listing payslips"
    );

    let data: Vec<PayslipResponse> = records
        .into_iter()
        .map(|r| {
            let employee = employees.get(&r.employee_id).cloned();
            PayslipResponse::new(r, employee)
        })
        .collect();

    Ok(HttpResponse::Ok().json(data))
}

#[utoipa::path(
    get,
    path = "/api/payslips/{id}",
    params(
        ("id" = String, Path, description = "Payslip ID")
    ),
    responses(
        (status = 200, description = "Payslip found", body = PayslipResponse),
        (status = 404, description = "Payslip not found", body = Object, example = json!({
            "error": "Payslip not found"
        }))
    ),
    tag = "Payslip"
)]
pub async fn get_payslip(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let payslip_id = path.into_inner();

    let record = sqlx::query_as::<_, PayslipRecord>("SELECT * FROM payslips WHERE id = ?")
        .bind(&payslip_id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(ApiError::payslip_not_found)?;

    let employee = find_employee(pool.get_ref(), &record.employee_id).await?;
    Ok(HttpResponse::Ok().json(PayslipResponse::new(record, employee)))
}

/// Preview Payslip
///
/// Computes line amounts, total and net salary for a draft without storing
/// anything.
#[utoipa::path(
    post,
    path = "/api/payslips/preview",
    request_body = PreviewPayslip,
    responses(
        (status = 200, description = "Computed totals", body = crate::utils::payslip_calc::PayslipSummary)
    ),
    tag = "Payslip"
)]
pub async fn preview_payslip(payload: web::Json<PreviewPayslip>) -> HttpResponse {
    let summary = payslip_calc::summarize(&payload.work_data, &payload.deductions);
    HttpResponse::Ok().json(summary)
}
