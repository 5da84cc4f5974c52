pub mod environment;
pub mod logging;
pub mod paths;
pub mod terminal;

pub use environment::{DATA_DIR_ENV, get_claude_dir};
pub use logging::init_logging;
pub use paths::{format_path_with_tilde, project_path_from_transcript};
pub use terminal::{preview_line, strip_ansi_codes};
