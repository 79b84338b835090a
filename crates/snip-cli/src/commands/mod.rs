pub mod detect;
pub mod dispatch;
pub mod search;
pub mod shared;
pub mod suggest;
pub mod url;
