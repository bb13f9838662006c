/// Id of the distinguished local user.
pub const ME_ID: &str = "me";

pub const NOTIFICATION_LIMIT: usize = 50;
pub const SUGGESTION_LIMIT: usize = 6;
pub const TRENDING_LIMIT: usize = 8;

pub const EXPORT_FILE_NAME: &str = "minisocial-backup.json";
pub const PLACEHOLDER_NAME: &str = "Unknown";

pub fn storage_key() -> String {
    std::env::var("MINISOCIAL_STORAGE_KEY")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "minisocial_v1".to_string())
}

pub fn data_dir() -> std::path::PathBuf {
    std::env::var("MINISOCIAL_DATA_DIR")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| ".minisocial".to_string())
        .into()
}

pub fn share_base_url() -> String {
    std::env::var("MINISOCIAL_SHARE_BASE_URL")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "https://minisocial.local/post/".to_string())
}
