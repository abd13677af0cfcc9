//! Turning tabular score sheets into [`Contest`](crate::model::structures::contest::Contest)s.

pub mod errors;
pub mod extraction;
pub mod score_sheet;
