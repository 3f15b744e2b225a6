//! Reusable UI pieces: dialog frames and fetch-state panels.

mod dialog_frame;
mod states;

pub use dialog_frame::{render_dialog_frame, DialogFrameConfig};
pub use states::{render_empty, render_error, render_loadable, render_loading};
