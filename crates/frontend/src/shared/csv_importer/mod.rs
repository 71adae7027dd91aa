pub mod parser;
pub mod types;

pub use parser::{detect_delimiter, parse, Delimiter, ParseOutcome};
pub use types::{
    FinishOutcome, ImportPhase, ImportPipeline, ImportWarning, PreviewModel, SubmitTicket,
    PREVIEW_LIMIT,
};
