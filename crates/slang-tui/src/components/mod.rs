pub mod entry_of_day;
pub mod header;
pub mod help_overlay;
pub mod slang_list;
pub mod submit_form;
