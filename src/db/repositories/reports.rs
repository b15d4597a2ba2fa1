use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::{
    clips::Confidence,
    db::{
        connection::Database,
        helpers::{format_datetime, parse_datetime, to_score},
        models::StoredReport,
    },
    metrics::DerivedMetrics,
    report::{ReportAverages, ReportClip, ReportPayload, ReportSink},
    tally::ActionCounts,
};

const REPORT_COLUMNS: &str = "id, subject_id, subject_name, source_locator, title, counts_json,
     rating, intensity, decision, positioning, tags_json, summary, created_at";

fn row_to_report(row: &Row) -> Result<StoredReport> {
    let counts_json: String = row.get("counts_json")?;
    let tags_json: String = row.get("tags_json")?;
    let created_at: String = row.get("created_at")?;

    let counts: ActionCounts =
        serde_json::from_str(&counts_json).context("failed to decode counts_json")?;
    let tags: Vec<String> =
        serde_json::from_str(&tags_json).context("failed to decode tags_json")?;

    Ok(StoredReport {
        id: row.get("id")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        payload: ReportPayload {
            subject_id: row.get("subject_id")?,
            subject_name: row.get("subject_name")?,
            source_locator: row.get("source_locator")?,
            title: row.get("title")?,
            counts,
            metrics: DerivedMetrics {
                rating: to_score(row.get("rating")?, "rating")?,
                intensity: to_score(row.get("intensity")?, "intensity")?,
                decision: to_score(row.get("decision")?, "decision")?,
                positioning: to_score(row.get("positioning")?, "positioning")?,
            },
            tags,
            summary: row.get("summary")?,
            clips: Vec::new(),
        },
    })
}

fn load_clips(conn: &Connection, report_id: &str) -> Result<Vec<ReportClip>> {
    let mut stmt = conn.prepare(
        "SELECT start_secs, end_secs, label, description, confidence
         FROM report_clips
         WHERE report_id = ?1
         ORDER BY position ASC",
    )?;

    let mut rows = stmt.query(params![report_id])?;
    let mut clips = Vec::new();
    while let Some(row) = rows.next()? {
        let confidence: String = row.get(4)?;
        clips.push(ReportClip {
            start: row.get(0)?,
            end: row.get(1)?,
            label: row.get(2)?,
            description: row.get(3)?,
            confidence: confidence.parse::<Confidence>()?,
        });
    }

    Ok(clips)
}

impl Database {
    /// Store a finalized payload and its clips in one transaction.
    pub async fn insert_report(&self, payload: &ReportPayload) -> Result<StoredReport> {
        let payload = payload.clone();
        self.execute(move |conn| {
            let report = StoredReport {
                id: Uuid::new_v4().to_string(),
                created_at: Utc::now(),
                payload,
            };
            let counts_json = serde_json::to_string(&report.payload.counts)?;
            let tags_json = serde_json::to_string(&report.payload.tags)?;

            let tx = conn
                .transaction()
                .context("failed to open report transaction")?;

            tx.execute(
                "INSERT INTO reports (id, subject_id, subject_name, source_locator, title,
                     counts_json, rating, intensity, decision, positioning, tags_json, summary,
                     created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    report.id,
                    report.payload.subject_id,
                    report.payload.subject_name,
                    report.payload.source_locator,
                    report.payload.title,
                    counts_json,
                    report.payload.metrics.rating,
                    report.payload.metrics.intensity,
                    report.payload.metrics.decision,
                    report.payload.metrics.positioning,
                    tags_json,
                    report.payload.summary,
                    format_datetime(&report.created_at),
                ],
            )
            .with_context(|| "failed to insert report")?;

            for (position, clip) in report.payload.clips.iter().enumerate() {
                tx.execute(
                    "INSERT INTO report_clips (report_id, position, start_secs, end_secs, label,
                         description, confidence)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        report.id,
                        position as i64,
                        clip.start,
                        clip.end,
                        clip.label,
                        clip.description,
                        clip.confidence.as_str(),
                    ],
                )
                .with_context(|| format!("failed to insert clip {position} of report"))?;
            }

            tx.commit().context("failed to commit report")?;
            Ok(report)
        })
        .await
    }

    pub async fn get_report(&self, report_id: &str) -> Result<Option<StoredReport>> {
        let report_id = report_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![report_id])?;
            let Some(row) = rows.next()? else {
                return Ok(None);
            };
            let mut report = row_to_report(row)?;
            report.payload.clips = load_clips(conn, &report.id)?;
            Ok(Some(report))
        })
        .await
    }

    /// All reports for one subject, newest first.
    pub async fn list_reports_for_subject(&self, subject_id: &str) -> Result<Vec<StoredReport>> {
        let subject_id = subject_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REPORT_COLUMNS} FROM reports
                 WHERE subject_id = ?1
                 ORDER BY created_at DESC, rowid DESC"
            ))?;

            let mut rows = stmt.query(params![subject_id])?;
            let mut reports = Vec::new();
            while let Some(row) = rows.next()? {
                reports.push(row_to_report(row)?);
            }
            drop(rows);
            drop(stmt);

            for report in &mut reports {
                report.payload.clips = load_clips(conn, &report.id)?;
            }

            Ok(reports)
        })
        .await
    }

    pub async fn subject_averages(&self, subject_id: &str) -> Result<ReportAverages> {
        let reports = self.list_reports_for_subject(subject_id).await?;
        Ok(ReportAverages::from_reports(
            reports.iter().map(|report| &report.payload),
        ))
    }
}

#[async_trait]
impl ReportSink for Database {
    async fn submit(&self, payload: &ReportPayload) -> Result<String> {
        let stored = self.insert_report(payload).await.map_err(|err| {
            anyhow!(
                "failed to store report for subject {}: {err:#}",
                payload.subject_id
            )
        })?;
        Ok(stored.id)
    }
}
