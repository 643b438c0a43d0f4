pub mod profile;

pub use profile::HtmlDocsProfile;
