//! Built-in item types instantiable from markup by name.

pub mod group;
pub mod label;
pub mod panel;

pub use group::Group;
pub use label::Label;
pub use panel::Panel;
