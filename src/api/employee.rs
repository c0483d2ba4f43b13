use crate::{
    error::ApiError,
    model::employee::{Employee, UPDATABLE_COLUMNS, WorkType},
    utils::{
        db_utils::{build_update_sql, execute_update},
        validation::{non_negative, required_text},
    },
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[schema(example = "Juan Dela Cruz", value_type = String)]
    pub name: Option<String>,
    #[schema(example = "01-2345678-9", value_type = String)]
    pub sss_number: Option<String>,
    #[schema(example = "1234-5678-9012", value_type = String)]
    pub pagibig_number: Option<String>,
    #[schema(example = "12-345678901-2", value_type = String)]
    pub philhealth_number: Option<String>,
    #[serde(default)]
    #[schema(example = 0.0)]
    pub daily_rate: f64,
    #[serde(default)]
    #[schema(example = 0.0)]
    pub monthly_rate: f64,
    #[serde(default)]
    #[schema(example = 0.0)]
    pub bultohan_rate: f64,
    #[serde(default)]
    pub work_type: WorkType,
}

impl CreateEmployee {
    fn into_employee(self) -> Result<Employee, ApiError> {
        Ok(Employee {
            id: Uuid::new_v4().to_string(),
            name: required_text("name", self.name)?,
            sss_number: required_text("sssNumber", self.sss_number)?,
            pagibig_number: required_text("pagibigNumber", self.pagibig_number)?,
            philhealth_number: required_text("philhealthNumber", self.philhealth_number)?,
            daily_rate: non_negative("dailyRate", self.daily_rate)?,
            monthly_rate: non_negative("monthlyRate", self.monthly_rate)?,
            bultohan_rate: non_negative("bultohanRate", self.bultohan_rate)?,
            work_type: self.work_type,
            created_at: Utc::now(),
        })
    }
}

pub(crate) async fn find_employee(
    pool: &SqlitePool,
    employee_id: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool)
        .await
}

/// Loads the employees behind a set of ids. Ids that no longer exist are
/// simply missing from the map.
pub(crate) async fn find_employees(
    pool: &SqlitePool,
    employee_ids: &[String],
) -> Result<HashMap<String, Employee>, sqlx::Error> {
    if employee_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; employee_ids.len()].join(", ");
    let sql = format!("SELECT * FROM employees WHERE id IN ({placeholders})");
    debug!(sql = %sql, count = employee_ids.len(), "Expanding employee references");

    let mut query = sqlx::query_as::<_, Employee>(&sql);
    for id in employee_ids {
        query = query.bind(id);
    }

    let employees = query.fetch_all(pool).await?;
    Ok(employees.into_iter().map(|e| (e.id.clone(), e)).collect())
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing or invalid field", body = Object, example = json!({
            "error": "sssNumber is required"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee = payload.into_inner().into_employee()?;

    sqlx::query(
        r#"
        INSERT INTO employees
        (id, name, sss_number, pagibig_number, philhealth_number,
         daily_rate, monthly_rate, bultohan_rate, work_type, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&employee.id)
    .bind(&employee.name)
    .bind(&employee.sss_number)
    .bind(&employee.pagibig_number)
    .bind(&employee.philhealth_number)
    .bind(employee.daily_rate)
    .bind(employee.monthly_rate)
    .bind(employee.bultohan_rate)
    .bind(employee.work_type)
    .bind(employee.created_at)
    .execute(pool.get_ref())
    .await?;

    info!(employee_id = %employee.id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, sorted by name", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY name ASC")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    match find_employee(pool.get_ref(), &employee_id).await? {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Err(ApiError::employee_not_found()),
    }
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    request_body(
        content = Object,
        description = "Any subset of name, sssNumber, pagibigNumber, philhealthNumber, dailyRate, monthlyRate, bultohanRate, workType. Unknown fields are ignored.",
        example = json!({ "dailyRate": 475.0, "workType": "lawas" })
    ),
    responses(
        (status = 200, description = "Updated employee", body = Employee),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    if let Some(update) = build_update_sql("employees", &body, UPDATABLE_COLUMNS, &employee_id)? {
        debug!(sql = %update.sql, employee_id = %employee_id, "Updating employee");

        let affected = execute_update(pool.get_ref(), update).await?;
        if affected == 0 {
            return Err(ApiError::employee_not_found());
        }
    }

    let employee = find_employee(pool.get_ref(), &employee_id)
        .await?
        .ok_or_else(ApiError::employee_not_found)?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
///
/// Payslips that reference the employee are left untouched.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let res = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(&employee_id)
        .execute(pool.get_ref())
        .await?;

    if res.rows_affected() == 0 {
        return Err(ApiError::employee_not_found());
    }

    info!(employee_id = %employee_id, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{test_app, test_pool};
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    fn juan() -> Value {
        json!({
            "name": "Juan Dela Cruz",
            "sssNumber": "01-2345678-9",
            "pagibigNumber": "1234-5678-9012",
            "philhealthNumber": "12-345678901-2",
            "dailyRate": 0,
            "monthlyRate": 0,
            "bultohanRate": 0,
            "workType": "both"
        })
    }

    #[actix_web::test]
    async fn create_then_get_returns_input_plus_id_and_timestamp() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(juan())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());
        assert!(created["createdAt"].is_string());

        let req = test::TestRequest::get()
            .uri(&format!("/api/employees/{id}"))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;

        let mut expected = juan();
        expected["id"] = json!(id);
        expected["createdAt"] = created["createdAt"].clone();
        for field in ["dailyRate", "monthlyRate", "bultohanRate"] {
            expected[field] = json!(0.0);
        }
        assert_eq!(fetched, expected);
    }

    #[actix_web::test]
    async fn defaults_rates_and_work_type() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({
                "name": "Pedro",
                "sssNumber": "1",
                "pagibigNumber": "2",
                "philhealthNumber": "3"
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(created["workType"], "both");
        assert_eq!(created["dailyRate"], 0.0);
    }

    #[actix_web::test]
    async fn missing_required_field_is_rejected() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let mut body = juan();
        body.as_object_mut().unwrap().remove("sssNumber");

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err, json!({ "error": "sssNumber is required" }));
    }

    #[actix_web::test]
    async fn malformed_body_gets_json_error() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let mut body = juan();
        body["workType"] = json!("sewing");

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let err: Value = test::read_body_json(resp).await;
        assert!(err["error"].is_string());
    }

    #[actix_web::test]
    async fn duplicate_statutory_ids_are_accepted() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/employees")
                .set_json(juan())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/api/employees").to_request();
        let list: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.len(), 2);
    }

    #[actix_web::test]
    async fn list_is_sorted_by_name() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        for name in ["Rosa", "Ana", "Miguel"] {
            let mut body = juan();
            body["name"] = json!(name);
            let req = test::TestRequest::post()
                .uri("/api/employees")
                .set_json(body)
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/employees").to_request();
        let list: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = list.iter().map(|e| e["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Ana", "Miguel", "Rosa"]);
    }

    #[actix_web::test]
    async fn partial_update_merges_fields() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(juan())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/employees/{id}"))
            .set_json(json!({ "bultohanRate": 12.5, "workType": "taklob", "id": "hijack" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let updated: Value = test::read_body_json(resp).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["name"], "Juan Dela Cruz");
        assert_eq!(updated["bultohanRate"], 12.5);
        assert_eq!(updated["workType"], "taklob");
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    #[actix_web::test]
    async fn update_with_no_known_fields_returns_record() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(juan())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/employees/{id}"))
            .set_json(json!({}))
            .to_request();
        let same: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(same, created);
    }

    #[actix_web::test]
    async fn update_rejects_negative_rate() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(juan())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/employees/{id}"))
            .set_json(json!({ "dailyRate": -5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_id_is_not_found() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let get = test::TestRequest::get().uri("/api/employees/nope").to_request();
        let put = test::TestRequest::put()
            .uri("/api/employees/nope")
            .set_json(json!({ "name": "X" }))
            .to_request();
        let put_empty = test::TestRequest::put()
            .uri("/api/employees/nope")
            .set_json(json!({}))
            .to_request();
        let delete = test::TestRequest::delete()
            .uri("/api/employees/nope")
            .to_request();

        for req in [get, put, put_empty, delete] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let err: Value = test::read_body_json(resp).await;
            assert_eq!(err, json!({ "error": "Employee not found" }));
        }
    }

    #[actix_web::test]
    async fn delete_removes_record() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(juan())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/employees/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Employee deleted successfully");

        let req = test::TestRequest::get()
            .uri(&format!("/api/employees/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
