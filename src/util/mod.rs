pub mod os_helper;
pub mod post_date;
