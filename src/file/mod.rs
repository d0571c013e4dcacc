//! ファイル操作モジュール
//!
//! 行カーソル付きファイルハンドルの実装：
//! - 逐次読み（行カーソルを1行ずつ進める）
//! - 指定行読み・全文読み（カーソルを先頭へ巻き戻す）
//! - 追記・空化・明示的クローズ

pub mod cursor;
pub mod line_file;

// 公開API
pub use cursor::LineCursor;
pub use line_file::{LineFile, Lines};
