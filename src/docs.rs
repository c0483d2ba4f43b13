use crate::api::employee::CreateEmployee;
use crate::api::payslip::{CreatePayslip, PreviewPayslip};
use crate::api::pricing::PriceQuote;
use crate::model::employee::{Employee, WorkType};
use crate::model::payslip::{Deductions, EmployeeRef, PayslipResponse, WorkEntry};
use crate::model::pricing::{Category, PricingTable};
use crate::utils::payslip_calc::PayslipSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payslip System API",
        version = "1.0.0",
        description = r#"
## Piece-rate Payslip System

Tracks piece-rate and daily-rate factory workers and produces periodic
payslips from itemized work entries and statutory deductions.

### Key Features
- **Employees**: create, update, list, view and delete worker records
- **Pricing**: read the taklob / lawas price lists and resolve a unit price
- **Payslips**: record payslips, preview totals, list with net salary

### Notes
- `totalSalary` and per-entry `price` are stored as submitted
- `netSalary` is derived on every read and never stored
- Errors are returned as `{"error": "<message>"}`
"#,
    ),
    paths(
        crate::api::pricing::get_pricing,
        crate::api::pricing::resolve_price,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::payslip::create_payslip,
        crate::api::payslip::list_payslips,
        crate::api::payslip::get_payslip,
        crate::api::payslip::preview_payslip
    ),
    components(
        schemas(
            Category,
            PricingTable,
            PriceQuote,
            WorkType,
            Employee,
            CreateEmployee,
            WorkEntry,
            Deductions,
            EmployeeRef,
            CreatePayslip,
            PreviewPayslip,
            PayslipResponse,
            PayslipSummary
        )
    ),
    tags(
        (name = "Pricing", description = "Piece-rate pricing table"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Payslip", description = "Payslip generation and listing"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/pricing",
            "/api/pricing/resolve",
            "/api/employees",
            "/api/employees/{id}",
            "/api/payslips",
            "/api/payslips/{id}",
            "/api/payslips/preview",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
