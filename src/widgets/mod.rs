pub mod editor;
pub mod input_box;

pub use editor::{CodeEditor, EditorWidget};
pub use input_box::{InputBox, InputBoxWidget};
