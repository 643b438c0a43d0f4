pub mod profile;
pub mod type_mapper;

pub use profile::JavaClientProfile;
