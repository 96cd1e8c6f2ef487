pub mod manage;
pub mod queries;
pub mod search;

pub use manage::{
    create_psychiatrist, remove_psychiatrist, update_psychiatrist, UpsertPsychiatrist,
};
pub use queries::{get_psychiatrist_details, list_psychiatrists, list_summaries};
pub use search::search_psychiatrists;
