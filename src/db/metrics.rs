use chrono::Utc;
use serde::Serialize;
use crate::errors::VoiceError;
use super::Database;

/// One recorded analytics event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub metadata: Option<String>,
    pub created_at: String,
}

impl Database {
    pub fn insert_metric(
        &self,
        name: &str,
        value: f64,
        metadata: Option<&str>,
    ) -> Result<MetricRecord, VoiceError> {
        let conn = self.lock()?;
        let created_at = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO metrics (name, value, metadata, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![name, value, metadata, created_at],
        ).map_err(|e| VoiceError::Database(format!("Failed to record metric: {}", e)))?;

        Ok(MetricRecord {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            value,
            metadata: metadata.map(str::to_string),
            created_at,
        })
    }

    /// Most recent metrics first.
    pub fn list_metrics(&self, limit: usize, offset: usize) -> Result<Vec<MetricRecord>, VoiceError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, value, metadata, created_at FROM metrics ORDER BY id DESC LIMIT ?1 OFFSET ?2"
        ).map_err(|e| VoiceError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![limit as i64, offset as i64], |row: &rusqlite::Row| {
            Ok(MetricRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                value: row.get(2)?,
                metadata: row.get(3)?,
                created_at: row.get(4)?,
            })
        }).map_err(|e| VoiceError::Database(format!("Query error: {}", e)))?;

        let mut metrics = Vec::new();
        for row in rows {
            metrics.push(row.map_err(|e| VoiceError::Database(format!("Row error: {}", e)))?);
        }
        Ok(metrics)
    }

    pub fn count_metrics(&self) -> Result<u64, VoiceError> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM metrics", [], |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
            .map_err(|e| VoiceError::Database(format!("Query error: {}", e)))
    }
}
