#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod markup;
pub mod parser;
pub mod render;
pub mod skin;
pub mod text_metrics;
pub mod wave;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::Config;
pub use error::DocumentError;
pub use parser::parse_document;
pub use render::{render_markup, render_svg};
pub use skin::Skin;
