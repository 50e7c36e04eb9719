//! Export hand-off
//!
//! Writes the export document to a transient location and passes it to a
//! share sink. The file is written under a temporary name and renamed into
//! place, so a failed write never leaves a partial `checklist.txt`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;
use tracing::{error, info};

use super::{serialize, ExportDocument};
use crate::models::Record;
use crate::{RelcheckError, Result, EXPORT_DIALOG_TITLE};

/// A written export file offered to the share sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub path: PathBuf,
    pub mime_type: String,
    pub dialog_title: String,
}

/// Receives an exported file, e.g. by opening it in another program
#[async_trait]
pub trait ShareSink: Send + Sync {
    async fn share(&self, file: &SharedFile) -> Result<()>;
}

/// Sink that only reports where the file was written
#[derive(Debug, Clone, Default)]
pub struct RevealShare;

#[async_trait]
impl ShareSink for RevealShare {
    async fn share(&self, file: &SharedFile) -> Result<()> {
        info!(path = %file.path.display(), mime = %file.mime_type, "export ready");
        Ok(())
    }
}

/// Sink that runs a program with the file path as its last argument
#[derive(Debug, Clone)]
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from `[program, args...]`; `None` for an empty command
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl ShareSink for CommandShare {
    async fn share(&self, file: &SharedFile) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&file.path)
            .status()
            .await
            .map_err(|e| {
                RelcheckError::ExportFailed(format!("failed to run {}: {}", self.program, e))
            })?;
        if !status.success() {
            return Err(RelcheckError::ExportFailed(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        info!(program = %self.program, path = %file.path.display(), "export shared");
        Ok(())
    }
}

async fn write_atomically(dir: &Path, document: &ExportDocument) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let target = dir.join(document.file_name);
    let staging = dir.join(format!("{}.tmp", document.file_name));
    if let Err(err) = fs::write(&staging, document.as_bytes()).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err);
    }
    if let Err(err) = fs::rename(&staging, &target).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err);
    }
    Ok(target)
}

/// Write `document` into `dir` and hand it to `sink`.
///
/// Returns the written path. Any failure is reported as `ExportFailed`.
pub async fn export(document: &ExportDocument, dir: &Path, sink: &dyn ShareSink) -> Result<PathBuf> {
    let path = write_atomically(dir, document).await.map_err(|e| {
        error!(dir = %dir.display(), error = %e, "writing export failed");
        RelcheckError::ExportFailed(format!("could not write {}: {}", document.file_name, e))
    })?;

    let file = SharedFile {
        path: path.clone(),
        mime_type: document.mime_type.to_string(),
        dialog_title: EXPORT_DIALOG_TITLE.to_string(),
    };
    sink.share(&file).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "sharing export failed");
        match e {
            RelcheckError::ExportFailed(_) => e,
            other => RelcheckError::ExportFailed(other.to_string()),
        }
    })?;
    Ok(path)
}

/// Serialize `records` and export them; nothing is written when empty
pub async fn export_records(records: &[Record], dir: &Path, sink: &dyn ShareSink) -> Result<PathBuf> {
    let document = serialize(records)?;
    export(&document, dir, sink).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingShare {
        shared: Mutex<Vec<SharedFile>>,
    }

    #[async_trait]
    impl ShareSink for RecordingShare {
        async fn share(&self, file: &SharedFile) -> Result<()> {
            self.shared.lock().unwrap().push(file.clone());
            Ok(())
        }
    }

    struct FailingShare;

    #[async_trait]
    impl ShareSink for FailingShare {
        async fn share(&self, _file: &SharedFile) -> Result<()> {
            Err(RelcheckError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "no share target",
            )))
        }
    }

    fn record() -> Record {
        Record {
            date: "2024-01-05".into(),
            time: "09:00".into(),
            room: "N434".into(),
            tester: "T1".into(),
            active_sockets: "8".into(),
            temperature: "21".into(),
            humidity: "38".into(),
            voltage: "11.9".into(),
            failed_positions: "3".into(),
            other_param_title: "".into(),
            other_param_value: "".into(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_export_writes_and_shares() {
        let dir = TempDir::new().unwrap();
        let sink = RecordingShare::default();
        let path = export_records(&[record()], dir.path(), &sink).await.unwrap();

        assert_eq!(path, dir.path().join("checklist.txt"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("2024-01-05,09:00,N434,T1,8,21,38,11.9,3,,"));
        assert!(!dir.path().join("checklist.txt.tmp").exists());

        let shared = sink.shared.lock().unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].mime_type, "text/plain");
        assert_eq!(shared[0].dialog_title, "Export Checklist Data");
    }

    #[tokio::test]
    async fn test_empty_export_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let sink = RecordingShare::default();
        let err = export_records(&[], &out, &sink).await.unwrap_err();
        assert!(matches!(err, RelcheckError::EmptyExport));
        assert!(!out.exists());
        assert!(sink.shared.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_share_failure_is_export_failed() {
        let dir = TempDir::new().unwrap();
        let err = export_records(&[record()], dir.path(), &FailingShare)
            .await
            .unwrap_err();
        assert!(matches!(err, RelcheckError::ExportFailed(_)));
    }

    #[tokio::test]
    async fn test_unwritable_dir_is_export_failed() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let err = export_records(&[record()], &blocker, &RevealShare)
            .await
            .unwrap_err();
        assert!(matches!(err, RelcheckError::ExportFailed(_)));
    }

    #[test]
    fn test_command_share_from_command_line() {
        assert!(CommandShare::from_command_line(&[]).is_none());
        let share =
            CommandShare::from_command_line(&["mail".into(), "-s".into(), "checklist".into()])
                .unwrap();
        assert_eq!(share.program, "mail");
        assert_eq!(share.args, vec!["-s".to_string(), "checklist".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_share_reports_exit_status() {
        let dir = TempDir::new().unwrap();
        let ok = CommandShare::new("true", Vec::new());
        assert!(export_records(&[record()], dir.path(), &ok).await.is_ok());

        let failing = CommandShare::new("false", Vec::new());
        let err = export_records(&[record()], dir.path(), &failing)
            .await
            .unwrap_err();
        assert!(matches!(err, RelcheckError::ExportFailed(_)));
    }
}
