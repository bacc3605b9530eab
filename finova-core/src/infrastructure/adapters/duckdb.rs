// finova-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

// Imports Hexagonaux
use crate::domain::profile::{AttributeProfile, DatasetProfile};
use crate::error::FinovaError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::profiler::{DatasetMetadata, ProfiledDataset, Profiler};

const DATASET_TABLE: &str = "finova_dataset";

struct ColumnInfo {
    name: String,
    data_type: String,
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Column statistics computed by an embedded DuckDB.
pub struct DuckDBProfiler {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBProfiler {
    pub fn new() -> Result<Self, InfrastructureError> {
        let conn = Connection::open_in_memory_with_flags(Config::default())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn profile_csv(&self, path: &Path) -> Result<ProfiledDataset, InfrastructureError> {
        if !path.is_file() {
            return Err(InfrastructureError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("dataset not found: {}", path.display()),
            )));
        }

        let conn = self
            .conn
            .lock()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned))?;

        conn.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM read_csv_auto({}, header = true)",
            quote_ident(DATASET_TABLE),
            quote_literal(&path.to_string_lossy())
        ))?;

        let columns = fetch_columns(&conn)?;
        let rows: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(DATASET_TABLE)),
            [],
            |row| row.get(0),
        )?;
        let rows = u64::try_from(rows).unwrap_or(0);

        let mut profile = DatasetProfile::new();
        for column in &columns {
            let mut attribute =
                AttributeProfile::new(column.name.clone()).with_type(column.data_type.clone());

            // Rates are undefined without rows.
            if rows > 0 {
                let (nulls, distinct): (i64, i64) = conn.query_row(
                    &format!(
                        "SELECT COUNT(*) - COUNT({col}), COUNT(DISTINCT {col}) FROM {table}",
                        col = quote_ident(&column.name),
                        table = quote_ident(DATASET_TABLE)
                    ),
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )?;
                let total = rows as f64;
                attribute = attribute
                    .with_null_rate(nulls as f64 / total)
                    .with_duplicate_rate(1.0 - distinct as f64 / total);
            }

            debug!(
                column = %attribute.name,
                null_rate = ?attribute.null_rate,
                duplicate_rate = ?attribute.duplicate_rate,
                "column profiled"
            );
            profile.insert(attribute);
        }

        conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", quote_ident(DATASET_TABLE)))?;

        Ok(ProfiledDataset {
            metadata: DatasetMetadata {
                rows,
                columns: columns.len(),
            },
            profile,
        })
    }
}

fn fetch_columns(conn: &Connection) -> Result<Vec<ColumnInfo>, InfrastructureError> {
    let mut stmt = conn.prepare(&format!(
        "PRAGMA table_info({})",
        quote_literal(DATASET_TABLE)
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok(ColumnInfo {
            name: row.get("name")?,
            data_type: row.get("type")?,
        })
    })?;

    let mut columns = Vec::new();
    for row in rows {
        columns.push(row?);
    }
    Ok(columns)
}

#[async_trait]
impl Profiler for DuckDBProfiler {
    #[instrument(skip(self), fields(engine = "duckdb"))]
    async fn profile(&self, path: &Path) -> Result<ProfiledDataset, FinovaError> {
        Ok(self.profile_csv(path)?)
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_profile_csv_rates() -> Result<()> {
        let dir = tempdir()?;
        let csv = dir.path().join("clients.csv");
        fs::write(
            &csv,
            "client_id,country,notes\n1,US,\n2,,vip\n2,FR,\n4,DE,\n",
        )?;

        let profiler = DuckDBProfiler::new()?;
        let result = profiler.profile(&csv).await?;

        assert_eq!(result.metadata, DatasetMetadata { rows: 4, columns: 3 });

        let names: Vec<&str> = result.profile.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["client_id", "country", "notes"]);

        let client_id = result
            .profile
            .get("client_id")
            .ok_or_else(|| anyhow::anyhow!("Column 'client_id' not found"))?;
        assert_eq!(client_id.null_rate, Some(0.0));
        assert_eq!(client_id.duplicate_rate, Some(0.25));

        let country = result
            .profile
            .get("country")
            .ok_or_else(|| anyhow::anyhow!("Column 'country' not found"))?;
        assert_eq!(country.null_rate, Some(0.25));
        assert_eq!(country.duplicate_rate, Some(0.25));
        assert_eq!(country.declared_type, "VARCHAR");
        Ok(())
    }

    #[tokio::test]
    async fn test_header_only_csv_has_no_rates() -> Result<()> {
        let dir = tempdir()?;
        let csv = dir.path().join("empty.csv");
        fs::write(&csv, "client_id,country\n")?;

        let result = DuckDBProfiler::new()?.profile(&csv).await?;

        assert_eq!(result.metadata.rows, 0);
        assert!(result
            .profile
            .iter()
            .all(|a| a.null_rate.is_none() && a.duplicate_rate.is_none()));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() -> Result<()> {
        let profiler = DuckDBProfiler::new()?;
        let result = profiler.profile(Path::new("/definitely/not/here.csv")).await;
        assert!(result.is_err());
        assert_eq!(profiler.engine_name(), "duckdb");
        Ok(())
    }
}
