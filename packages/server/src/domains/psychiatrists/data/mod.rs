pub mod psychiatrist;

pub use psychiatrist::{PsychiatristData, PsychiatristDetail, PsychiatristSummary};
