pub mod entity_page;
pub mod panel;

pub use entity_page::EntityPage;
pub use panel::PanelShell;
