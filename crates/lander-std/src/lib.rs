mod style;
pub mod symbols;
pub mod url;

pub use style::is_no_color_set;
pub use style::Style;
pub use symbols::success_checkmark;
pub use url::hyperlink;
pub use url::sanitize_url;
