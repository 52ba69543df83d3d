pub mod invitation;
pub mod member;
pub mod organization;
pub mod plan;
