use matzip_db::schema::SchemaRegistry;
use sqlx::PgPool;

/// Connect, migrate, and confirm the live schema matches the registry.
#[sqlx::test(migrations = "../../db/migrations")]
async fn bootstrap_matches_registry(pool: PgPool) {
    matzip_db::health_check(&pool).await.unwrap();
    SchemaRegistry::new().verify(&pool).await.unwrap();
}

/// A drifted delete rule is reported, not silently accepted.
#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_detects_changed_delete_rule(pool: PgPool) {
    let constraint: String = sqlx::query_scalar(
        "SELECT conname::text FROM pg_constraint
         WHERE conrelid = 'restaurants'::regclass
           AND contype = 'f'
           AND pg_get_constraintdef(oid) LIKE '%regions%'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    sqlx::query(&format!(
        "ALTER TABLE restaurants DROP CONSTRAINT {constraint},
         ADD CONSTRAINT {constraint} FOREIGN KEY (region_id)
             REFERENCES regions (id) ON DELETE CASCADE"
    ))
    .execute(&pool)
    .await
    .unwrap();

    let err = SchemaRegistry::new().verify(&pool).await.unwrap_err();
    assert!(err.to_string().contains("region_id"), "unexpected error: {err}");
}

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::text, data_type::text
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn all_tables_have_timestamps(pool: PgPool) {
    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT table_name::text, column_name::text, data_type::text
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND column_name IN ('created_at', 'updated_at')
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let registry = SchemaRegistry::new();
    assert_eq!(rows.len(), registry.entities().len() * 2);
    for (table, col, data_type) in &rows {
        assert_eq!(
            data_type, "timestamp with time zone",
            "Table {table}.{col} should be timestamptz"
        );
    }
}

/// TEXT with CHECK constraints is used instead of VARCHAR.
#[sqlx::test(migrations = "../../db/migrations")]
async fn no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::text, column_name::text
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "Found VARCHAR columns: {rows:?}");
}

/// `updated_at` is bumped by trigger on update.
#[sqlx::test(migrations = "../../db/migrations")]
async fn updated_at_trigger_fires(pool: PgPool) {
    let (id, before): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO regions (name, updated_at) VALUES ('Jeju', NOW() - INTERVAL '1 hour')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let after: chrono::DateTime<chrono::Utc> =
        sqlx::query_scalar("UPDATE regions SET name = 'Jeju-si' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(after > before);
}
