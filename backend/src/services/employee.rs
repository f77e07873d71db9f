//! Employee registry service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct EmployeeService {
    db: PgPool,
}

/// An employee record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeInput {
    pub full_name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployeeInput {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
}

const EMPLOYEE_COLUMNS: &str =
    "id, full_name, role, phone, email, position, department, hire_date, salary, created_at";

impl EmployeeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateEmployeeInput) -> AppResult<Employee> {
        if input.full_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "full_name".to_string(),
                message: "full_name is required".to_string(),
                message_ru: "Укажите ФИО сотрудника".to_string(),
            });
        }

        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (full_name, role, phone, email, position, department, hire_date, salary)
            VALUES ($1, COALESCE($2, 'employee'), $3, $4, $5, $6, $7, $8)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&input.full_name)
        .bind(&input.role)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.position)
        .bind(&input.department)
        .bind(input.hire_date)
        .bind(input.salary)
        .fetch_one(&self.db)
        .await?;

        Ok(employee)
    }

    pub async fn update(&self, id: i64, input: UpdateEmployeeInput) -> AppResult<Employee> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees
            SET full_name = COALESCE($1, full_name),
                role = COALESCE($2, role),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                position = COALESCE($5, position),
                department = COALESCE($6, department),
                hire_date = COALESCE($7, hire_date),
                salary = COALESCE($8, salary)
            WHERE id = $9
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&input.full_name)
        .bind(&input.role)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.position)
        .bind(&input.department)
        .bind(input.hire_date)
        .bind(input.salary)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee".to_string()))?;

        Ok(employee)
    }

    pub async fn get(&self, id: i64) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee".to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY full_name"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(employees)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Employee".to_string()));
        }
        Ok(())
    }
}
