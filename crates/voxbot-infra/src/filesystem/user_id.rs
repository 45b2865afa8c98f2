//! Client-generated user id, persisted in `<data_dir>/user_id`.
//!
//! Format: `user_` followed by 9 lowercase base-36 characters. The id is the
//! only thing that ties a client to its history; it is not a credential.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

pub const USER_ID_FILE: &str = "user_id";
const PREFIX: &str = "user_";
const SUFFIX_LEN: usize = 9;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn user_id_path(data_dir: &Path) -> PathBuf {
    data_dir.join(USER_ID_FILE)
}

/// A fresh random id such as `user_k3x9a0qzt`.
pub fn generate_user_id() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(PREFIX.len() + SUFFIX_LEN);
    id.push_str(PREFIX);
    for _ in 0..SUFFIX_LEN {
        id.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    id
}

/// Read the stored id, or generate and store a new one.
///
/// Any non-blank single-token content is accepted so a user can pin a
/// hand-picked id.
pub async fn load_or_create_user_id(data_dir: &Path) -> std::io::Result<String> {
    let path = user_id_path(data_dir);

    match tokio::fs::read_to_string(&path).await {
        Ok(content) => {
            let stored = content.trim();
            if !stored.is_empty() && !stored.contains(char::is_whitespace) {
                return Ok(stored.to_string());
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }

    let id = generate_user_id();
    tokio::fs::create_dir_all(data_dir).await?;
    tokio::fs::write(&path, format!("{id}\n")).await?;
    info!(user_id = %id, path = %path.display(), "Created new user id");
    Ok(id)
}
