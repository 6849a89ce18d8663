pub mod activity;
pub mod conversation;
pub mod footer;
pub mod format;
pub mod header;
pub mod help_overlay;
pub mod input_bar;
