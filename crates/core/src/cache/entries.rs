//! Cached response body reads and writes.
//!
//! The storage boundary swallows its own failures: a read error is
//! indistinguishable from a miss, and a write error never stops the
//! response already in hand from reaching the caller.

use super::connection::CacheStore;
use crate::Error;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl CacheStore {
    /// Look up the cached body for a fingerprint.
    ///
    /// Returns `None` for a missing entry and for any storage failure;
    /// the caller cannot tell the two apart.
    pub async fn get(&self, fingerprint: &str) -> Option<String> {
        match self.fetch(fingerprint).await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!("cache read failed for {fingerprint}: {err}");
                None
            }
        }
    }

    /// Persist a response body under a fingerprint, overwriting any
    /// previous entry.
    ///
    /// Best-effort: a failed write is logged and otherwise ignored.
    pub async fn set(&self, fingerprint: &str, body: &str) {
        if let Err(err) = self.store(fingerprint, body).await {
            tracing::warn!("cache write failed for {fingerprint}: {err}");
        }
    }

    async fn fetch(&self, fingerprint: &str) -> Result<Option<String>, Error> {
        let fingerprint = fingerprint.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let result = conn.query_row(
                    "SELECT body FROM entries WHERE fingerprint = ?1",
                    params![fingerprint],
                    |row| row.get(0),
                );

                match result {
                    Ok(body) => Ok(Some(body)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    async fn store(&self, fingerprint: &str, body: &str) -> Result<(), Error> {
        let fingerprint = fingerprint.to_string();
        let body = body.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO entries (fingerprint, body) VALUES (?1, ?2)
                     ON CONFLICT(fingerprint) DO UPDATE SET body = excluded.body",
                    params![fingerprint, body],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}
