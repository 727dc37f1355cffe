//! ビューモジュール

pub mod questionnaire;

pub use questionnaire::QuestionnaireForm;
