//! Per-installation identity: a stable id used as the remote document key.
//! Falls back to a session-scoped id when local storage is unavailable; that
//! id is never written, so it does not survive the process.

use std::fs;
use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use crate::persist::store::StoreError;

pub const PLAYER_ID_FILE: &str = "player_id";

/// Read the stored id, generating and persisting a fresh one when absent.
/// Storage failure degrades to a session id with a warning on stderr.
pub fn load_or_create_player_id(data_dir: &Path) -> String {
    match stored_player_id(data_dir) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("player id storage unavailable ({err}); using session-scoped id");
            session_player_id()
        }
    }
}

fn stored_player_id(data_dir: &Path) -> Result<String, StoreError> {
    let path = data_dir.join(PLAYER_ID_FILE);
    if path.exists() {
        let raw = fs::read_to_string(&path)?;
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
    let id = Uuid::new_v4().to_string();
    fs::create_dir_all(data_dir)?;
    fs::write(&path, &id)?;
    Ok(id)
}

fn session_player_id() -> String {
    format!("session-{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "shadowgym-identity-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn id_is_generated_once_and_stable_across_reads() {
        let dir = temp_dir("stable");
        let first = load_or_create_player_id(&dir);
        let second = load_or_create_player_id(&dir);
        assert_eq!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn blank_id_file_is_replaced() {
        let dir = temp_dir("blank");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PLAYER_ID_FILE), "  \n").unwrap();
        let id = load_or_create_player_id(&dir);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn session_fallback_has_the_expected_shape() {
        let id = session_player_id();
        assert!(id.starts_with("session-"));
    }
}
