pub mod contest;
pub mod event_key;
pub mod participant;
pub mod processing;
