pub mod attachment;
pub mod category;
pub mod kind;
pub mod payload;
pub mod story;
