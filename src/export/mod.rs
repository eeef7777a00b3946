use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{RIME_SORT, RIME_VERSION};
use crate::ime::reduce::{merge_weighted, unique_words};
use crate::ime::Entry;

/// one unique word per line
pub fn write_words<W: Write>(entries: &[Entry], mut out: W) -> Result<()> {
    for w in unique_words(entries) {
        writeln!(out, "{}", w)?;
    }
    out.flush()?;
    Ok(())
}

pub fn rime_header(name: &str) -> String {
    format!(
        "# Rime dictionary\n\
         # encoding: utf-8\n\
         ---\n\
         name: {name}\n\
         version: \"{RIME_VERSION}\"\n\
         sort: {RIME_SORT}\n\
         use_preset_vocabulary: false\n\
         ...\n"
    )
}

/// Rime dict: header, then `word\tpinyin\tfreq` per merged word
pub fn write_rime<W: Write>(entries: &[Entry], name: &str, mut out: W) -> Result<()> {
    out.write_all(rime_header(name).as_bytes())?;
    for w in merge_weighted(entries) {
        writeln!(out, "{}\t{}\t{}", w.word, w.pinyin.join(" "), w.freq)?;
    }
    out.flush()?;
    Ok(())
}

/// every decoded entry, unreduced
pub fn write_json<W: Write>(entries: &[Entry], out: W) -> Result<()> {
    serde_json::to_writer_pretty(out, entries)?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn write_words_file(entries: &[Entry], path: &Path) -> Result<()> {
    write_words(entries, create(path)?).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn write_rime_file(entries: &[Entry], name: &str, path: &Path) -> Result<()> {
    write_rime(entries, name, create(path)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn write_json_file(entries: &[Entry], path: &Path) -> Result<()> {
    let mut out = create(path)?;
    write_json(entries, &mut out)
        .and_then(|_| out.flush().map_err(Into::into))
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("你好", vec!["ni".into(), "hao".into()], 3),
            Entry::new("hello", vec!["hello".into()], 1),
            Entry::new("你好", vec!["ni".into(), "hao".into()], 7),
            Entry::new("空", vec![], 0),
        ]
    }

    #[test]
    fn words_one_per_line() -> Result<()> {
        let mut buf = Vec::new();
        write_words(&entries(), &mut buf)?;
        assert_eq!(String::from_utf8(buf)?, "你好\nhello\n空\n");
        Ok(())
    }

    #[test]
    fn rime_layout() -> Result<()> {
        let mut buf = Vec::new();
        write_rime(&entries(), "custom_dict", &mut buf)?;
        let text = String::from_utf8(buf)?;
        let expected = "# Rime dictionary\n\
                        # encoding: utf-8\n\
                        ---\n\
                        name: custom_dict\n\
                        version: \"0.1\"\n\
                        sort: by_weight\n\
                        use_preset_vocabulary: false\n\
                        ...\n\
                        你好\tni hao\t7\n\
                        hello\thello\t1\n\
                        空\t\t0\n";
        assert_eq!(text, expected);
        Ok(())
    }

    #[test]
    fn json_dump() -> Result<()> {
        let mut buf = Vec::new();
        write_json(&entries()[..1], &mut buf)?;
        let v: serde_json::Value = serde_json::from_slice(&buf)?;
        assert_eq!(v[0]["word"], "你好");
        assert_eq!(v[0]["pinyin"][1], "hao");
        assert_eq!(v[0]["freq"], 3);
        Ok(())
    }
}
