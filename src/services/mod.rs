//! External collaborators reached over the network
//!
//! Both services sit behind traits so that sessions can be driven by fakes in
//! tests and by saved responses offline.
//!
//! - `extraction` - scoresheet image to move tokens
//! - `opponent` - position to reply move, for play mode

pub mod extraction;
pub mod opponent;

pub use extraction::{ExtractionResponse, ExtractionService, HttpExtractionClient, SavedExtraction};
pub use opponent::{HttpOpponentClient, OpponentService};
