//! Table definitions for telemetry records.

/// DDL applied at startup. Idempotent; migrations proper are out of scope
/// for this service.
pub const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS gyroscope (
        id BIGSERIAL PRIMARY KEY,
        device_id TEXT NOT NULL,
        x DOUBLE PRECISION NOT NULL,
        y DOUBLE PRECISION NOT NULL,
        z DOUBLE PRECISION NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS gps (
        id BIGSERIAL PRIMARY KEY,
        device_id TEXT NOT NULL,
        latitude DOUBLE PRECISION NOT NULL,
        longitude DOUBLE PRECISION NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS photo (
        id BIGSERIAL PRIMARY KEY,
        device_id TEXT NOT NULL,
        photo TEXT NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL,
        recognized BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
];
