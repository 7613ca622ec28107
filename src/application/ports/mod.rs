mod document_renderer;
mod media_model_client;
mod repository_error;
mod session_repository;
mod staging_store;

pub use document_renderer::{DocumentRenderer, RenderError};
pub use media_model_client::{MediaModelClient, MediaModelError};
pub use repository_error::RepositoryError;
pub use session_repository::SessionRepository;
pub use staging_store::{StagingStore, StagingStoreError};
