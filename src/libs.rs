pub mod dropdown;
pub mod error;
pub mod html;
pub mod markup;
pub mod options;
pub mod script;
pub mod template;
pub mod translations;
pub mod widget;
