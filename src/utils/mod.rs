pub mod db_utils;
pub mod payslip_calc;
pub mod validation;
