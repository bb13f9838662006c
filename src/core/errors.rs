use crate::widgets::Alert;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Post not found: {0}")]
    PostNotFound(String),
    #[error("Write something or add an image")]
    EmptyPost,
    #[error("Import failed: {0}")]
    InvalidImport(#[from] serde_json::Error),
    #[error("Copy failed: {0}")]
    Clipboard(String),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<AppError> for Alert {
    fn from(err: AppError) -> Self {
        match err {
            AppError::PostNotFound(_) => Alert::new("That post no longer exists"),
            AppError::EmptyPost => Alert::new("Write something or add an image"),
            AppError::InvalidImport(_) => Alert::new("Import failed"),
            AppError::Clipboard(_) => Alert::new("Copy failed"),
            AppError::Storage(_) => Alert::new("Could not save your changes"),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
