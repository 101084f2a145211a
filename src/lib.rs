pub mod batch;
pub mod catalog;
pub mod config;
pub mod content;
pub mod images;
pub mod logger;
pub mod migrator;
pub mod post_list;
pub mod ref_fixer;
pub mod rewrite;
pub mod text_utils;
pub mod util;
mod test_data;
