// Domain modules

pub mod psychiatrists;
pub mod taxonomy;
