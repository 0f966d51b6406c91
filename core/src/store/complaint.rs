use super::PortalStore;
use crate::{
    complaint::{ComplaintRecord, ComplaintStatus, Priority, Sentiment, TimelineEntry},
    error::PortalResult,
    intake::FiledComplaint,
    provider::{ComplaintSummary, CountRow},
};
use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type};

fn parse_ts(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_name<T>(
    idx: usize,
    s: String,
    parse: fn(&str) -> Option<T>,
    what: &str,
) -> rusqlite::Result<T> {
    parse(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown {what}: {s}").into(),
        )
    })
}

// Timeline rows are fetched separately; the mapper fills `updates` empty.
fn complaint_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComplaintRecord> {
    Ok(ComplaintRecord {
        id: row.get(0)?,
        subject: row.get(1)?,
        category: row.get(2)?,
        priority: parse_name(3, row.get(3)?, Priority::parse, "priority")?,
        status: parse_name(4, row.get(4)?, ComplaintStatus::parse, "status")?,
        created: parse_ts(5, row.get(5)?)?,
        updated: parse_ts(6, row.get(6)?)?,
        estimated_resolution: parse_ts(7, row.get(7)?)?,
        assigned_to: row.get(8)?,
        sentiment: parse_name(9, row.get(9)?, Sentiment::parse, "sentiment")?,
        urgency_score: row.get::<_, i64>(10)? as u8,
        updates: Vec::new(),
    })
}

fn summary_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComplaintSummary> {
    Ok(ComplaintSummary {
        id: row.get(0)?,
        subject: row.get(1)?,
        category: row.get(2)?,
        priority: parse_name(3, row.get(3)?, Priority::parse, "priority")?,
        status: parse_name(4, row.get(4)?, ComplaintStatus::parse, "status")?,
        created: parse_ts(5, row.get(5)?)?,
        sentiment: parse_name(6, row.get(6)?, Sentiment::parse, "sentiment")?,
        urgency_score: row.get::<_, i64>(7)? as u8,
    })
}

const RECORD_COLUMNS: &str = "token, subject, category, priority, status, created, updated,
     estimated_resolution, assigned_to, sentiment, urgency_score";

impl PortalStore {
    // ── Complaint ──────────────────────────────────────────────────

    /// Insert a record with no submission metadata (seed data).
    pub fn insert_complaint(&self, record: &ComplaintRecord) -> PortalResult<()> {
        self.insert_row(record, None, None, None, None)
    }

    /// Insert a freshly filed complaint including intake metadata.
    pub fn insert_filed(&self, filed: &FiledComplaint) -> PortalResult<()> {
        self.insert_row(
            &filed.record,
            Some(&filed.receipt_id),
            Some(&filed.passenger_id),
            filed.train_type.as_deref(),
            Some(&filed.description),
        )
    }

    fn insert_row(
        &self,
        record: &ComplaintRecord,
        receipt_id: Option<&str>,
        passenger_id: Option<&str>,
        train_type: Option<&str>,
        description: Option<&str>,
    ) -> PortalResult<()> {
        self.conn.execute(
            "INSERT INTO complaint (
                token, subject, category, priority, status, created, updated,
                estimated_resolution, assigned_to, sentiment, urgency_score,
                receipt_id, passenger_id, train_type, description
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                &record.id,
                &record.subject,
                &record.category,
                record.priority.as_str(),
                record.status.as_str(),
                record.created.to_rfc3339(),
                record.updated.to_rfc3339(),
                record.estimated_resolution.to_rfc3339(),
                &record.assigned_to,
                record.sentiment.as_str(),
                record.urgency_score as i64,
                receipt_id,
                passenger_id,
                train_type,
                description,
            ],
        )?;
        for entry in &record.updates {
            self.append_timeline_entry(&record.id, entry)?;
        }
        Ok(())
    }

    pub fn append_timeline_entry(&self, token: &str, entry: &TimelineEntry) -> PortalResult<()> {
        self.conn.execute(
            "INSERT INTO timeline_entry (token, date, status, message, officer)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                token,
                entry.date.to_rfc3339(),
                entry.status.as_str(),
                &entry.message,
                &entry.officer,
            ],
        )?;
        Ok(())
    }

    /// Keyed lookup. Returns `None` for an unknown token; the timeline
    /// comes back in date order.
    pub fn get_complaint(&self, token: &str) -> PortalResult<Option<ComplaintRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM complaint WHERE token = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![token], complaint_row_mapper)?;
        let Some(record) = rows.next().transpose()? else {
            return Ok(None);
        };
        let mut record = record;
        record.updates = self.timeline_for(token)?;
        Ok(Some(record))
    }

    fn timeline_for(&self, token: &str) -> PortalResult<Vec<TimelineEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, status, message, officer FROM timeline_entry
             WHERE token = ?1 ORDER BY date ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![token], |row| {
            Ok(TimelineEntry {
                date: parse_ts(0, row.get(0)?)?,
                status: parse_name(1, row.get(1)?, ComplaintStatus::parse, "status")?,
                message: row.get(2)?,
                officer: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn recent_complaints(&self, limit: usize) -> PortalResult<Vec<ComplaintSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT token, subject, category, priority, status, created, sentiment, urgency_score
             FROM complaint ORDER BY created DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], summary_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Dashboard counts ───────────────────────────────────────────

    pub fn total_count(&self) -> PortalResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM complaint", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// Complaints not yet resolved or closed.
    pub fn open_count(&self) -> PortalResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM complaint WHERE status NOT IN ('resolved', 'closed')",
                [],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    pub fn resolved_count(&self) -> PortalResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM complaint WHERE status IN ('resolved', 'closed')",
                [],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// Mean days from created to updated over resolved complaints.
    pub fn avg_resolution_days(&self) -> PortalResult<f64> {
        self.conn
            .query_row(
                "SELECT COALESCE(AVG(julianday(updated) - julianday(created)), 0.0)
                 FROM complaint WHERE status IN ('resolved', 'closed')",
                [],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    pub fn priority_counts(&self) -> PortalResult<Vec<CountRow>> {
        self.grouped_counts("priority")
    }

    pub fn category_counts(&self) -> PortalResult<Vec<CountRow>> {
        self.grouped_counts("category")
    }

    fn grouped_counts(&self, column: &str) -> PortalResult<Vec<CountRow>> {
        // `column` is a compile-time constant at both call sites.
        let sql = format!(
            "SELECT {column}, COUNT(*) FROM complaint GROUP BY {column} ORDER BY COUNT(*) DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(CountRow {
                label: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
