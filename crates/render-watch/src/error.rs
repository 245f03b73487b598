#[derive(Debug, thiserror::Error)]
pub enum RenderWatchError {
    #[error("failed to start filesystem watcher: {0}")]
    Notify(#[from] notify::Error),
}
