// src/db/expense_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::expense::{Expense, ExpenseCategory},
};

#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        category: ExpenseCategory,
        amount: Decimal,
        expense_date: NaiveDate,
        description: Option<&str>,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (category, amount, expense_date, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(category)
        .bind(amount)
        .bind(expense_date)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn update(
        &self,
        id: Uuid,
        category: ExpenseCategory,
        amount: Decimal,
        expense_date: NaiveDate,
        description: Option<&str>,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET category = $2, amount = $3, expense_date = $4, description = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(category)
        .bind(amount)
        .bind(expense_date)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        expense.ok_or(AppError::ExpenseNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ExpenseNotFound);
        }
        Ok(())
    }

    pub async fn list_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT * FROM expenses
            WHERE expense_date BETWEEN $1 AND $2
            ORDER BY expense_date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn sum_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(amount) FROM expenses WHERE expense_date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }
}
