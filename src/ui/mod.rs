pub mod color;
pub mod font;
pub mod menu_list;
