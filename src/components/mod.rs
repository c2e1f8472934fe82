pub mod control;
pub mod editor_state;
pub mod field_actions;
pub mod field_state;
pub mod floating_input;
pub(crate) mod utils;

#[cfg(test)]
mod test_state_logic;

pub use editor_state::EditorState;
pub use field_state::{FieldState, FieldStateInput};
pub use floating_input::{FloatingLabelInput, InputHandle, input_handle};
