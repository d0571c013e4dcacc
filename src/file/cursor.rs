//! 行カーソル管理
//!
//! ファイル先頭から数えた「次に読む行」の位置を管理

/// 逐次読みの行カーソル
///
/// ファイル先頭から消費済みの行数を保持する。巻き戻しで 0 に戻る。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCursor {
    /// 消費済み行数（0ベース）
    line: usize,
}

impl LineCursor {
    /// 先頭位置のカーソルを作成
    pub fn new() -> Self {
        Self { line: 0 }
    }

    /// 指定行位置のカーソルを作成
    pub fn at(line: usize) -> Self {
        Self { line }
    }

    /// 現在の行位置
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1行読み進める
    ///
    /// EOF到達後の読みでも加算される。カーソルがファイルの行数を
    /// 超えることを許す（逐次読みの規約）。
    pub fn advance(&mut self) {
        self.line += 1;
    }

    /// 先頭に巻き戻す
    pub fn rewind(&mut self) {
        self.line = 0;
    }
}

impl Default for LineCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_at_origin() {
        let cursor = LineCursor::new();
        assert_eq!(cursor.line(), 0);
        assert_eq!(cursor, LineCursor::default());
    }

    #[test]
    fn test_advance_and_rewind() {
        let mut cursor = LineCursor::new();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line(), 2);

        cursor.rewind();
        assert_eq!(cursor.line(), 0);
    }

    #[test]
    fn test_at_positions_cursor() {
        let mut cursor = LineCursor::at(5);
        assert_eq!(cursor.line(), 5);

        // ファイルの行数を超えても加算できる
        cursor.advance();
        assert_eq!(cursor.line(), 6);
    }
}
