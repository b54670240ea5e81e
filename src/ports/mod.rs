// src/ports/mod.rs
pub mod html;
pub mod markdown;
pub mod text;

pub use html::HtmlPresenter;
pub use text::TextPresenter;
