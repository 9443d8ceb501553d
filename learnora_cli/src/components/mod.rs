pub mod modal;
pub mod spinner;
/// Component module exports
pub mod text;

pub use modal::{centered_rect, Modal, ModalWidget};
pub use spinner::{spinner_frame, LoadingScreen};
pub use text::{tail_to_width, wrap_text};
