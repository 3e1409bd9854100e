use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, Transaction};

use crate::domain::employee::{Employee, Skill};
use crate::domain::repositories::{
    BatchUpsert, EmployeeRepository, RepositoryError, UpsertOutcome, REASON_NAME_CONFLICT,
};
use crate::domain::search::{NormalizedCriteria, SortField, SortOrder};

/// PostgreSQL implementation of EmployeeRepository
///
/// Batch upserts run inside a single transaction per batch; identity
/// conflicts (existing id under a different name) are collected and
/// reported instead of overwriting. Queries are built at runtime because
/// the filter and sort shape depends on the criteria.
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads and attaches the skill lists for the given employees. Employees
    /// without stored skills keep `skills = None`.
    async fn attach_skills(&self, employees: &mut [Employee]) -> Result<(), RepositoryError> {
        if employees.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = employees.iter().map(|e| e.employee_id).collect();
        let rows = sqlx::query(
            "SELECT id, employee_id, name, category FROM skills \
             WHERE employee_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut by_employee: HashMap<i32, Vec<Skill>> = HashMap::new();
        for row in rows {
            by_employee
                .entry(row.get("employee_id"))
                .or_default()
                .push(Skill {
                    skill_id: Some(row.get("id")),
                    name: row.get("name"),
                    category: row.get("category"),
                });
        }

        for employee in employees {
            employee.skills = by_employee.remove(&employee.employee_id);
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn upsert_one(&self, employee: &Employee) -> Result<UpsertOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let outcome = upsert_record(&mut tx, employee).await.map_err(db_err)?;

        match outcome {
            RecordOutcome::Conflict => {
                tx.rollback().await.map_err(db_err)?;
                Ok(UpsertOutcome {
                    validation_error: true,
                    message: REASON_NAME_CONFLICT.to_string(),
                })
            }
            RecordOutcome::Added | RecordOutcome::Updated => {
                tx.commit().await.map_err(db_err)?;
                Ok(UpsertOutcome {
                    validation_error: false,
                    message: "Operation completed successfully.".to_string(),
                })
            }
        }
    }

    async fn upsert_batch(&self, employees: Vec<Employee>) -> Result<BatchUpsert, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let mut result = BatchUpsert::default();

        for employee in employees {
            match upsert_record(&mut tx, &employee).await.map_err(db_err)? {
                RecordOutcome::Added => result.added += 1,
                RecordOutcome::Updated => result.updated += 1,
                RecordOutcome::Conflict => result.conflicts.push(employee),
            }
        }

        tx.commit().await.map_err(db_err)?;
        Ok(result)
    }

    async fn search_by_skill(
        &self,
        criteria: &NormalizedCriteria,
    ) -> Result<Vec<Employee>, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT e.id, e.name, e.department, e.is_deleted, e.date_created \
             FROM employees e \
             JOIN skills s ON s.employee_id = e.id \
             WHERE e.is_deleted = FALSE",
        );
        if let Some(skill_name) = &criteria.skill_name {
            builder.push(" AND s.name ILIKE ");
            builder.push_bind(skill_name);
        }
        if let Some(category) = &criteria.skill_category {
            builder.push(" AND s.category ILIKE ");
            builder.push_bind(category);
        }
        if let Some(department) = &criteria.department {
            builder.push(" AND e.department ILIKE ");
            builder.push_bind(department);
        }
        builder.push(" GROUP BY e.id, e.name, e.department, e.is_deleted, e.date_created");
        push_order_and_page(&mut builder, criteria, true);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let mut employees: Vec<Employee> = rows.iter().map(map_employee).collect();
        self.attach_skills(&mut employees).await?;
        Ok(employees)
    }

    async fn search_missing_skill(
        &self,
        criteria: &NormalizedCriteria,
    ) -> Result<Vec<Employee>, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT e.id, e.name, e.department, e.is_deleted, e.date_created \
             FROM employees e \
             WHERE e.is_deleted = FALSE",
        );
        if let Some(department) = &criteria.department {
            builder.push(" AND e.department ILIKE ");
            builder.push_bind(department);
        }
        // Without a skill predicate this selects employees with no skills at
        // all; with one, employees lacking a matching skill.
        builder.push(" AND NOT EXISTS (SELECT 1 FROM skills s WHERE s.employee_id = e.id");
        if let Some(skill_name) = &criteria.skill_name {
            builder.push(" AND s.name ILIKE ");
            builder.push_bind(skill_name);
        }
        if let Some(category) = &criteria.skill_category {
            builder.push(" AND s.category ILIKE ");
            builder.push_bind(category);
        }
        builder.push(")");
        push_order_and_page(&mut builder, criteria, false);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let mut employees: Vec<Employee> = rows.iter().map(map_employee).collect();
        self.attach_skills(&mut employees).await?;
        Ok(employees)
    }
}

enum RecordOutcome {
    Added,
    Updated,
    Conflict,
}

/// Upserts one employee inside the given transaction.
///
/// An existing id with a different name is a conflict and leaves the row
/// untouched. An existing id with the same name updates the department and
/// replaces the skill list when one was supplied; `skills = None` leaves
/// stored skills as they are.
async fn upsert_record(
    tx: &mut Transaction<'_, Postgres>,
    employee: &Employee,
) -> Result<RecordOutcome, sqlx::Error> {
    let existing: Option<String> = sqlx::query_scalar("SELECT name FROM employees WHERE id = $1")
        .bind(employee.employee_id)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        Some(name) if name != employee.name => Ok(RecordOutcome::Conflict),
        Some(_) => {
            sqlx::query("UPDATE employees SET department = $2 WHERE id = $1")
                .bind(employee.employee_id)
                .bind(&employee.department)
                .execute(&mut **tx)
                .await?;
            replace_skills(tx, employee).await?;
            Ok(RecordOutcome::Updated)
        }
        None => {
            sqlx::query(
                "INSERT INTO employees (id, name, department, is_deleted, date_created) \
                 VALUES ($1, $2, $3, FALSE, NOW())",
            )
            .bind(employee.employee_id)
            .bind(&employee.name)
            .bind(&employee.department)
            .execute(&mut **tx)
            .await?;
            replace_skills(tx, employee).await?;
            Ok(RecordOutcome::Added)
        }
    }
}

async fn replace_skills(
    tx: &mut Transaction<'_, Postgres>,
    employee: &Employee,
) -> Result<(), sqlx::Error> {
    let Some(skills) = employee.skills.as_deref() else {
        return Ok(());
    };

    sqlx::query("DELETE FROM skills WHERE employee_id = $1")
        .bind(employee.employee_id)
        .execute(&mut **tx)
        .await?;
    for skill in skills {
        sqlx::query("INSERT INTO skills (employee_id, name, category) VALUES ($1, $2, $3)")
            .bind(employee.employee_id)
            .bind(&skill.name)
            .bind(&skill.category)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

fn push_order_and_page(
    builder: &mut QueryBuilder<'_, Postgres>,
    criteria: &NormalizedCriteria,
    with_skills: bool,
) {
    builder.push(" ORDER BY ");
    builder.push(order_expr(criteria.sort_field, with_skills));
    builder.push(match criteria.sort_order {
        SortOrder::Asc => " ASC",
        SortOrder::Desc => " DESC",
    });

    let offset = i64::from(criteria.page_number - 1) * i64::from(criteria.page_size);
    builder.push(" LIMIT ");
    builder.push_bind(i64::from(criteria.page_size));
    builder.push(" OFFSET ");
    builder.push_bind(offset);
}

/// Maps a sort field to a SQL expression. The allow-list was enforced
/// during normalization; this only translates the enum to column text.
/// Skill-based sorts need the joined skills relation; the skill-gap query
/// has none, so they fall back to the creation date there.
fn order_expr(field: SortField, with_skills: bool) -> &'static str {
    match field {
        SortField::Name => "e.name",
        SortField::Department => "e.department",
        SortField::DateCreated => "e.date_created",
        SortField::Skill => {
            if with_skills {
                "MIN(s.name)"
            } else {
                "e.date_created"
            }
        }
        SortField::Category => {
            if with_skills {
                "MIN(s.category)"
            } else {
                "e.date_created"
            }
        }
    }
}

fn map_employee(row: &PgRow) -> Employee {
    Employee {
        employee_id: row.get("id"),
        name: row.get("name"),
        department: row.get("department"),
        is_deleted: row.get("is_deleted"),
        date_created: row.get::<Option<DateTime<Utc>>, _>("date_created"),
        skills: None,
        error: None,
    }
}

fn db_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(err.to_string())
}
