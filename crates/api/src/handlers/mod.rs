pub mod admin;
pub mod feedback;
pub mod notices;
