use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::utils::db_utils::{Column, FieldKind};

/// Which price lists an employee works from.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum WorkType {
    Taklob,
    Lawas,
    #[default]
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "5f0c2d1e-8a4b-4c3d-9e2f-1a2b3c4d5e6f",
        "name": "Juan Dela Cruz",
        "sssNumber": "01-2345678-9",
        "pagibigNumber": "1234-5678-9012",
        "philhealthNumber": "12-345678901-2",
        "dailyRate": 0.0,
        "monthlyRate": 0.0,
        "bultohanRate": 0.0,
        "workType": "both",
        "createdAt": "2024-01-15T08:30:00Z"
    })
)]
pub struct Employee {
    pub id: String,

    #[schema(example = "Juan Dela Cruz")]
    pub name: String,

    #[schema(example = "01-2345678-9")]
    pub sss_number: String,

    #[schema(example = "1234-5678-9012")]
    pub pagibig_number: String,

    #[schema(example = "12-345678901-2")]
    pub philhealth_number: String,

    pub daily_rate: f64,
    pub monthly_rate: f64,
    pub bultohan_rate: f64,

    pub work_type: WorkType,

    #[schema(example = "2024-01-15T08:30:00Z", value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// JSON keys a partial update may touch, and the columns they land in.
/// `id` and `createdAt` are absent on purpose.
pub const UPDATABLE_COLUMNS: &[Column] = &[
    Column::new("name", "name", FieldKind::Text),
    Column::new("sssNumber", "sss_number", FieldKind::Text),
    Column::new("pagibigNumber", "pagibig_number", FieldKind::Text),
    Column::new("philhealthNumber", "philhealth_number", FieldKind::Text),
    Column::new("dailyRate", "daily_rate", FieldKind::Amount),
    Column::new("monthlyRate", "monthly_rate", FieldKind::Amount),
    Column::new("bultohanRate", "bultohan_rate", FieldKind::Amount),
    Column::new("workType", "work_type", FieldKind::WorkType),
];
