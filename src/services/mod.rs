pub mod api;
pub mod compare;
pub mod filter;
pub mod format;
pub mod guard;
pub mod pages;
pub mod slug;
