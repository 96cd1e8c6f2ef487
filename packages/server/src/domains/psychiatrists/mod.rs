//! Psychiatrists domain - provider records, their five association sets, and
//! the matching query behind the public search.

pub mod actions;
pub mod data;
pub mod models;

pub use data::{PsychiatristData, PsychiatristDetail, PsychiatristSummary};
pub use models::psychiatrist::{AssociationSets, Credentials, Psychiatrist, PsychiatristAttributes};
pub use models::search::SearchCriteria;
