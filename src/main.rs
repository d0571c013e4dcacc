//! デモドライバ
//!
//! 素の std::fs でデモ用ファイルを用意し、LineFile の公開APIを
//! 一通り実行して動作を表示する

use anyhow::Context;
use linefile::LineFile;

fn main() -> anyhow::Result<()> {
    println!("linefile - line-oriented file access demo");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demo.txt".to_string());

    // 既存ファイルを前提とするAPIなので、先に種を書き込んでおく
    std::fs::write(&path, "Hello, world!\nThis is a test.\n")
        .with_context(|| format!("failed to seed {}", path))?;

    let mut file = LineFile::open(&path)?;
    for line in file.lines() {
        println!("{}", line);
    }
    println!();

    // 空にしてから書き直す
    file.truncate()?;
    file.write_line("API Test")?;
    file.write_line("second line")?;
    println!("{}", file.read_next()?);
    println!("{}", file.read_next()?);

    // 逐次読みの途中で追記した行もそのまま読める
    file.write_line("written later")?;
    println!("{}", file.read_next()?);

    // 指定行読みはカーソルを先頭へ巻き戻す
    println!("{}", file.read_line_at(2)?);
    println!("{}", file.read_next()?);

    file.truncate()?;
    file.close();

    Ok(())
}
