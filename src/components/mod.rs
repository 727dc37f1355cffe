//! UIコンポーネントモジュール

pub mod clear_button;
pub mod indicator;

pub use clear_button::ClearDraftButton;
pub use indicator::{shared_indicator, DomSurface, Indicator, NoticeSurface, Notifier};
