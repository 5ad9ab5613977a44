pub mod clock;
pub mod dashboard;
pub mod sign_in;
