pub mod profile;

pub use profile::{SpecEchoProfile, SpecEchoYamlProfile};
