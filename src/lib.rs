pub mod badge;
pub mod checks;
pub mod cli;
pub mod error;
pub mod fold;
pub mod github;
pub mod model;
pub mod render;
pub mod report;
pub mod resolve;
pub mod summaries;
pub mod table;
pub mod violation;
