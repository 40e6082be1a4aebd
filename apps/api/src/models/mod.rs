pub mod certificate;
pub mod intern;
pub mod mentor;
pub mod project;
