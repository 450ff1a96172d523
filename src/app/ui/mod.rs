mod details;
mod panels;
mod search;

pub(super) use details::draw_info_panel;
