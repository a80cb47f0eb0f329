pub mod ports;
pub mod service;
pub mod wizard;

pub use service::{ImportService, ImportServiceDeps};
pub use wizard::{FileKind, ImportMode, UploadedFile, WizardController, WizardStep};
