pub mod header;
pub mod upload_zone;
pub mod file_list;
pub mod progress_bar;
pub mod results_panel;
