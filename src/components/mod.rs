pub mod context_menu;
pub mod drawer;
pub mod editor_state;
pub mod force_graph;
pub mod legend;
pub mod modals;
pub mod notice;
pub mod toolbar;
