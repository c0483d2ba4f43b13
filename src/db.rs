use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::debug;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id                TEXT PRIMARY KEY NOT NULL,
        name              TEXT NOT NULL,
        sss_number        TEXT NOT NULL,
        pagibig_number    TEXT NOT NULL,
        philhealth_number TEXT NOT NULL,
        daily_rate        REAL NOT NULL DEFAULT 0,
        monthly_rate      REAL NOT NULL DEFAULT 0,
        bultohan_rate     REAL NOT NULL DEFAULT 0,
        work_type         TEXT NOT NULL DEFAULT 'both',
        created_at        TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_employees_name ON employees (name)",
    // no foreign key on employee_id: a payslip outlives its employee
    r#"
    CREATE TABLE IF NOT EXISTS payslips (
        id                     TEXT PRIMARY KEY NOT NULL,
        employee_id            TEXT NOT NULL,
        period                 TEXT NOT NULL,
        work_data              TEXT NOT NULL,
        sss_deduction          REAL NOT NULL,
        pagibig_deduction      REAL NOT NULL,
        philhealth_deduction   REAL NOT NULL,
        cash_advance_deduction REAL NOT NULL DEFAULT 0,
        total_salary           REAL NOT NULL,
        remaining_advance      REAL NOT NULL DEFAULT 0,
        created_at             TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_payslips_created_at ON payslips (created_at)",
];

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Creates the tables if they are missing. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!(statements = SCHEMA.len(), "Schema ready");
    Ok(())
}
