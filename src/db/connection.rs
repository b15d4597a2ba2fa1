//! Report database handle.
//!
//! rusqlite connections are not `Sync`, so a single connection lives on its
//! own thread. Async callers ship closures to it over a channel and await the
//! result on a oneshot.

use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use rusqlite::Connection;
use tokio::sync::oneshot;

use super::migrations::run_migrations;

type Job = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum WorkerMessage {
    Run(Job),
    Stop,
}

struct Worker {
    jobs: mpsc::Sender<WorkerMessage>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        let handle = match self.thread.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(handle) = handle else {
            return;
        };

        if self.jobs.send(WorkerMessage::Stop).is_err() {
            warn!("report database worker already gone at shutdown");
        }
        if let Err(panic) = handle.join() {
            error!("report database worker panicked: {panic:?}");
        }
    }
}

fn open_connection(path: &Path) -> Result<Connection> {
    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to open report database {}", path.display()))?;

    // WAL is best effort (unavailable on some filesystems); cascades are not.
    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        warn!("report database stays in rollback journal mode: {err}");
    }
    conn.pragma_update(None, "foreign_keys", "ON")
        .context("failed to enable foreign keys")?;

    run_migrations(&mut conn).context("failed to migrate report database")?;
    Ok(conn)
}

fn serve(mut conn: Connection, jobs: mpsc::Receiver<WorkerMessage>) {
    for message in jobs {
        match message {
            WorkerMessage::Run(job) => job(&mut conn),
            WorkerMessage::Stop => break,
        }
    }
    info!("report database worker stopped");
}

/// Cheap to clone; every clone talks to the same worker thread.
#[derive(Clone)]
pub struct Database {
    worker: Arc<Worker>,
    path: Arc<PathBuf>,
}

impl Database {
    /// Open (creating parent directories and the schema as needed) and start
    /// the worker. Returns once the schema is current.
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let (jobs_tx, jobs_rx) = mpsc::channel::<WorkerMessage>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
        let worker_path = path.clone();

        let thread = thread::Builder::new()
            .name("scout-capture-db".into())
            .spawn(move || match open_connection(&worker_path) {
                Ok(conn) => {
                    if ready_tx.send(Ok(())).is_ok() {
                        serve(conn, jobs_rx);
                    }
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                }
            })
            .context("failed to spawn report database worker")?;

        ready_rx
            .recv()
            .context("report database worker exited during startup")??;

        info!("report database ready at {}", path.display());

        Ok(Self {
            worker: Arc::new(Worker {
                jobs: jobs_tx,
                thread: Mutex::new(Some(thread)),
            }),
            path: Arc::new(path),
        })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Run `job` on the worker's connection.
    pub async fn execute<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.worker
            .jobs
            .send(WorkerMessage::Run(Box::new(move |conn| {
                // The caller may have been cancelled; the result is dropped then.
                let _ = reply_tx.send(job(conn));
            })))
            .map_err(|_| anyhow!("report database worker is not running"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("report database worker dropped the request"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn clones_share_one_connection() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("a").join("reports.db")).unwrap();
        let other = db.clone();

        db.execute(|conn| {
            conn.execute_batch("CREATE TEMP TABLE scratch (n INTEGER); INSERT INTO scratch VALUES (7);")?;
            Ok(())
        })
        .await
        .unwrap();

        // Temp tables are per connection, so this only works on the same one.
        let n: i64 = other
            .execute(|conn| Ok(conn.query_row("SELECT n FROM scratch", [], |row| row.get(0))?))
            .await
            .unwrap();
        assert_eq!(n, 7);
        assert!(db.path().ends_with("reports.db"));
    }

    #[tokio::test]
    async fn job_errors_reach_the_caller() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("reports.db")).unwrap();
        let result: Result<()> = db
            .execute(|conn| {
                conn.execute_batch("SELECT * FROM no_such_table")?;
                Ok(())
            })
            .await;
        assert!(result.is_err());

        // The worker survives a failed job.
        let ok: i64 = db
            .execute(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get(0))?))
            .await
            .unwrap();
        assert_eq!(ok, 1);
    }
}
