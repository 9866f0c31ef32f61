/// The directory could not be read; no subscriber can be evaluated.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    #[error("failed to read subscribers: {0}")]
    Database(#[from] sqlx::Error),
    #[error("subscriber directory is unavailable: {0}")]
    Unavailable(String),
}
