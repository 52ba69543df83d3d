pub mod directory;
pub mod invitation;
pub mod membership;
