pub mod busy;
pub mod summary_modal;
pub mod video_list;
