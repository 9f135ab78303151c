pub mod action_bar;
pub mod form;
pub mod panels;
pub mod viewport;
