//! エラーハンドリング
//!
//! linefile 全体で使用する統一されたエラー型を定義
//! 読みのEOFはエラーにしない（空文字列／None を返す規約）

use thiserror::Error;

/// ライブラリ全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum LineFileError {
    /// ファイル操作エラー
    #[error("File operation failed")]
    File(#[from] FileError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum FileError {
    #[error("Unable to open file: {path}")]
    Open { path: String },

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("File handle is closed")]
    Closed,

    #[error("IO error: {message}")]
    Io { message: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, LineFileError>;

// std::io::Error から LineFileError への変換
impl From<std::io::Error> for LineFileError {
    fn from(error: std::io::Error) -> Self {
        LineFileError::File(FileError::Io {
            message: error.to_string(),
        })
    }
}
