pub mod choices;
pub mod input;
pub mod search;
pub mod state;
