pub mod controller;
pub mod state;
pub mod step;

pub use controller::{WizardComponents, WizardController};
pub use state::WizardState;
pub use step::{FileKind, ImportMode, UploadedFile, WizardStep};
