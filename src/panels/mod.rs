mod canvas_panel;
mod toolbar_panel;
mod unsupported_panel;

pub use canvas_panel::canvas_panel;
pub use toolbar_panel::toolbar_panel;
pub use unsupported_panel::unsupported_panel;
