pub mod apply;
pub mod delete;
pub mod dispatch;
pub mod plan;
pub mod read;
