//! 行カーソル付きファイルハンドル
//!
//! パスと読み書き両用ハンドルを所有し、行単位の逐次読み・指定行読み・
//! 全文読み・追記・空化を提供する

use crate::error::{FileError, LineFileError, Result};
use crate::file::cursor::LineCursor;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// 行カーソル付きの読み書きファイルハンドル
///
/// 逐次読みは先頭から `cursor` の行数だけ読み飛ばして位置決めするため、
/// 1回の呼び出しコストは O(消費済み行数)。ハンドルは開いたまま保持し、
/// 読み直しのための再オープンは行わない。
///
/// ハンドルは Drop で自動的に解放される。`close` による明示的な解放も
/// 可能で、解放後の読み書きは [`FileError::Closed`] になる。
pub struct LineFile {
    /// ファイルパス
    path: PathBuf,
    /// 読み書き両用ハンドル（クローズ後は None）
    handle: Option<File>,
    /// 逐次読みカーソル
    cursor: LineCursor,
}

impl LineFile {
    /// 既存ファイルを読み書きモードで開く
    ///
    /// ファイルが存在しない場合は作成せず失敗する。
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let handle = Self::open_handle(path)?;
        log::debug!("opened {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            handle: Some(handle),
            cursor: LineCursor::new(),
        })
    }

    /// 読み書きモードでハンドルを開く（作成はしない）
    fn open_handle(path: &Path) -> Result<File> {
        // 存在チェック
        if !path.exists() {
            return Err(LineFileError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }

        // ディレクトリではないことを確認
        if path.is_dir() {
            return Err(LineFileError::File(FileError::InvalidPath {
                path: path.display().to_string(),
            }));
        }

        OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                log::warn!("open failed for {}: {}", path.display(), e);
                LineFileError::File(FileError::Open {
                    path: path.display().to_string(),
                })
            })
    }

    /// 現在のパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ハンドルが開いているか
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// パスを差し替えて開き直す
    ///
    /// カーソルは先頭に戻る。開き直しに失敗した場合はハンドルを
    /// クローズ状態のまま残してエラーを返す。
    pub fn set_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();

        self.handle = None;
        self.path = path.to_path_buf();
        self.cursor.rewind();

        self.handle = Some(Self::open_handle(path)?);
        log::debug!("switched to {}", path.display());
        Ok(())
    }

    /// ファイル末尾に1行追記する
    ///
    /// `text` の後に改行を書き足す。カーソルは動かさない。
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        let mut handle = self.handle.as_ref().ok_or(FileError::Closed)?;
        handle.seek(SeekFrom::End(0))?;
        handle.write_all(text.as_bytes())?;
        handle.write_all(b"\n")?;
        Ok(())
    }

    /// 次の行を読む（逐次読み）
    ///
    /// 先頭から消費済み行数を読み飛ばし、続く1行を改行抜きで返す。
    /// EOF以降は空文字列を返す（エラーにはしない）。EOF以降も
    /// カーソルは加算されるため、後から追記された行は巻き戻しまで
    /// 逐次読みには現れない。
    pub fn read_next(&mut self) -> Result<String> {
        let line = self.next_line()?;
        Ok(line.unwrap_or_default())
    }

    /// 逐次読みの内部実装
    ///
    /// 1バイトも消費しなかった（EOF）場合は None。空行とEOFを
    /// 区別するため Lines イテレータもこちらを使う。
    fn next_line(&mut self) -> Result<Option<String>> {
        let handle = self.handle.as_ref().ok_or(FileError::Closed)?;
        let mut reader = Self::reader_from_start(handle)?;
        skip_lines(&mut reader, self.cursor.line())?;

        let mut line = String::new();
        let consumed = reader.read_line(&mut line)?;
        self.cursor.advance();

        if consumed == 0 {
            return Ok(None);
        }
        trim_line_ending(&mut line);
        Ok(Some(line))
    }

    /// 指定行を読む（1始まり）
    ///
    /// カーソルを先頭に巻き戻してから `n` 行読み、最後の1行を返す。
    /// `n` が 0 または行数を超える場合は空文字列。巻き戻しは後続の
    /// 逐次読みにも及ぶ（この直後の `read_next` は1行目を返す）。
    pub fn read_line_at(&mut self, n: usize) -> Result<String> {
        self.cursor.rewind();

        let handle = self.handle.as_ref().ok_or(FileError::Closed)?;
        let mut reader = Self::reader_from_start(handle)?;

        let mut line = String::new();
        for _ in 0..n {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Ok(String::new());
            }
        }
        trim_line_ending(&mut line);
        Ok(line)
    }

    /// 全行を読む
    ///
    /// カーソルを先頭に巻き戻し、各行の末尾に改行を付けて連結する。
    /// 最終行に改行がないファイルでも結果の末尾には改行が付く。
    /// 終了時のカーソルは先頭のまま。
    pub fn read_all(&mut self) -> Result<String> {
        self.cursor.rewind();

        let handle = self.handle.as_ref().ok_or(FileError::Closed)?;
        let mut reader = Self::reader_from_start(handle)?;

        let mut result = String::new();
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            trim_line_ending(&mut line);
            result.push_str(&line);
            result.push('\n');
        }
        Ok(result)
    }

    /// ファイルを空にする
    ///
    /// 現在のパスを truncate モードで開き直し、空のまま読み書き可能な
    /// 状態にする。パスにファイルがなければ作成する。カーソルは
    /// 先頭に戻る。
    pub fn truncate(&mut self) -> Result<()> {
        self.handle = None;

        let handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| {
                log::warn!("truncate failed for {}: {}", self.path.display(), e);
                LineFileError::File(FileError::Open {
                    path: self.path.display().to_string(),
                })
            })?;

        self.handle = Some(handle);
        self.cursor.rewind();
        log::debug!("truncated {}", self.path.display());
        Ok(())
    }

    /// ハンドルを閉じる
    ///
    /// 冪等。閉じた後の読み書きは [`FileError::Closed`] になり、
    /// `set_path` で開き直すまでクローズ状態が続く。
    pub fn close(&mut self) {
        if self.handle.take().is_some() {
            log::debug!("closed {}", self.path.display());
        }
    }

    /// 逐次読みイテレータ
    ///
    /// `next` は `read_next` と同じカーソルを進める。EOF（または
    /// クローズ済み）で None。途中の空行は `Some("")` として返る。
    pub fn lines(&mut self) -> Lines<'_> {
        Lines { file: self }
    }

    /// 先頭に巻き戻したリーダを作る
    fn reader_from_start(handle: &File) -> Result<BufReader<&File>> {
        let mut handle = handle;
        handle.seek(SeekFrom::Start(0))?;
        Ok(BufReader::new(handle))
    }
}

/// LineFile 上の逐次読みイテレータ
pub struct Lines<'a> {
    file: &'a mut LineFile,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.file.next_line().ok().flatten()
    }
}

// 追記ショートハンド。`writeln!` を `write_line` と同じ追記位置で
// 使えるようにする。クローズ後は io::Error (NotConnected)。
impl Write for LineFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut handle = self.handle.as_ref().ok_or_else(closed_io_error)?;
        handle.seek(SeekFrom::End(0))?;
        handle.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.handle.as_ref() {
            Some(mut handle) => handle.flush(),
            None => Ok(()),
        }
    }
}

fn closed_io_error() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "file handle is closed")
}

/// 行末の改行（`\n` / `\r\n`）を取り除く
fn trim_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

/// 先頭から `count` 行を読み飛ばす（EOFに達したら打ち切り）
fn skip_lines<R: BufRead>(reader: &mut R, count: usize) -> Result<()> {
    let mut buf = Vec::new();
    for _ in 0..count {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
    }
    Ok(())
}
