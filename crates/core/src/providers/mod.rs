pub mod traits;

// HTTP collaborators
pub mod doviz;
pub mod gold_feed;
