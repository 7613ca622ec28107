mod minutes_pipeline;
pub mod minutes_prompt;
mod minutes_service;
mod session_service;

pub use minutes_pipeline::{MinutesPipeline, PipelineError, PollSettings, RunArtifacts};
pub use minutes_prompt::instruction_for;
pub use minutes_service::{MinutesError, MinutesService, RenderedDocument};
pub use session_service::{SessionError, SessionService};
