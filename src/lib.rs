pub mod atf;
pub mod utility;
