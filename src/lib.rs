//! linefile - line-oriented file access library
//!
//! 読み書き両用ハンドルと行カーソルによる逐次読みの実装

// コアモジュール
pub mod error;

// データ層
pub mod file;

// 公開API
pub use error::{FileError, LineFileError, Result};
pub use file::{LineCursor, LineFile, Lines};
