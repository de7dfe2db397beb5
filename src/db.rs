//!
//! # Startup schema
//!
//! Idempotent DDL run once at process start, before the server accepts
//! traffic. Postgres has no `CREATE TYPE IF NOT EXISTS`, so the enum is
//! guarded by catching `duplicate_object`.

use sqlx::PgPool;

pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "DO $$ BEGIN
             CREATE TYPE todo_priority AS ENUM ('low', 'medium', 'high');
         EXCEPTION
             WHEN duplicate_object THEN NULL;
         END $$;",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
             id UUID PRIMARY KEY,
             username VARCHAR(32) NOT NULL,
             email VARCHAR(255) NOT NULL UNIQUE,
             password_hash VARCHAR(255) NOT NULL,
             created_at TIMESTAMPTZ NOT NULL DEFAULT now()
         )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS todos (
             id UUID PRIMARY KEY,
             user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
             description VARCHAR(1000) NOT NULL,
             due_date TIMESTAMPTZ,
             priority todo_priority NOT NULL DEFAULT 'medium',
             is_completed BOOLEAN NOT NULL DEFAULT FALSE,
             completed_at TIMESTAMPTZ,
             CHECK (is_completed = (completed_at IS NOT NULL))
         )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
