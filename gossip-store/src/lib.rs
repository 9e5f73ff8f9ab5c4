//! Date-partitioned store for raw gossip HTML.
//!
//! Pages live at `<root>/<year>/<month>/<day>/<am|pm>_gossip.html`, with
//! numbers written without zero padding. Only raw HTML is ever persisted;
//! parsed structures are rebuilt from it on demand.
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use gossip_common::{Result, TimeOfDay};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FILE_SUFFIX: &str = "_gossip.html";

#[derive(Debug, Clone)]
pub struct RawStore {
    root: PathBuf,
}

impl RawStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding both buckets of one day.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use gossip_store::RawStore;
    /// use std::path::PathBuf;
    ///
    /// let store = RawStore::new("/data/raw");
    /// let day = NaiveDate::from_ymd_opt(2018, 7, 8).unwrap();
    /// assert_eq!(store.day_dir(day), PathBuf::from("/data/raw/2018/7/8"));
    /// ```
    pub fn day_dir(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(date.year().to_string())
            .join(date.month().to_string())
            .join(date.day().to_string())
    }

    pub fn raw_path(&self, date: NaiveDate, tod: TimeOfDay) -> PathBuf {
        self.day_dir(date).join(file_name(tod))
    }

    /// Read the page stored for a bucket; `None` when nothing was saved.
    pub async fn load_raw(&self, date: NaiveDate, tod: TimeOfDay) -> Result<Option<String>> {
        let path = self.raw_path(date, tod);
        match tokio::fs::read_to_string(&path).await {
            Ok(html) => {
                debug!(path = %path.display(), length = html.len(), "store.load");
                Ok(Some(html))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "store.load.missing");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist a page under the bucket of `at` (UTC date and hour).
    ///
    /// The content goes to a temporary sibling first and is renamed into
    /// place, so readers never see a half-written page.
    pub async fn save_raw(&self, html: &str, at: DateTime<Utc>) -> Result<PathBuf> {
        let path = self.raw_path(at.date_naive(), TimeOfDay::of(&at));
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let tmp = path.with_extension("html.part");
        tokio::fs::write(&tmp, html).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        info!(path = %path.display(), length = html.len(), "store.save");
        Ok(path)
    }

    /// Buckets present on disk for a day, latest first.
    pub async fn available(&self, date: NaiveDate) -> Result<Vec<TimeOfDay>> {
        let mut found = Vec::new();
        for tod in TimeOfDay::LATEST_FIRST {
            if tokio::fs::try_exists(self.raw_path(date, tod)).await? {
                found.push(tod);
            }
        }
        Ok(found)
    }

    /// The most recent bucket stored for a day, preferring the afternoon.
    pub async fn latest_available(&self, date: NaiveDate) -> Result<Option<TimeOfDay>> {
        Ok(self.available(date).await?.into_iter().next())
    }
}

fn file_name(tod: TimeOfDay) -> String {
    format!("{tod}{FILE_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_carry_the_bucket_prefix() {
        assert_eq!(file_name(TimeOfDay::Am), "am_gossip.html");
        assert_eq!(file_name(TimeOfDay::Pm), "pm_gossip.html");
    }

    #[test]
    fn paths_are_not_zero_padded() {
        let store = RawStore::new("root");
        let date = NaiveDate::from_ymd_opt(2019, 1, 2).unwrap();
        assert_eq!(
            store.raw_path(date, TimeOfDay::Am),
            PathBuf::from("root/2019/1/2/am_gossip.html")
        );
    }
}
