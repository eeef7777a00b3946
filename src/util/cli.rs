use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::read_dir,
    path::{Path, PathBuf},
};

use crate::config::{parse_offset, Offsets, BAIDU_START_OFFSET, SCEL_START_CHINESE, SCEL_START_PY};
use crate::convert::{ConvertOptions, Outputs, RimeName};
use crate::ime::DictFormat;

/// Convert Baidu (.bdict/.bcd) and Sogou (.scel) IME dictionaries into a word list and a Rime dict.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the dictionary files. Outputs are written next to each input.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Also convert files in subdirectories.
    #[arg(short, long)]
    pub recurse: bool,

    /// Only convert Baidu dictionaries.
    #[arg(long)]
    pub baidu: bool,

    /// Only convert Sogou dictionaries.
    #[arg(long)]
    pub sogou: bool,

    /// Do not write the <name>.txt word list.
    #[arg(long)]
    pub no_txt: bool,

    /// Do not write the <name>.dict.yaml Rime dictionary.
    #[arg(long)]
    pub no_rime: bool,

    /// Also dump the decoded entries as <name>.json.
    #[arg(long)]
    pub json: bool,

    /// Use this Rime dictionary name for every file instead of the file's basename.
    #[arg(long, value_name = "NAME")]
    pub rime_name: Option<String>,

    /// Start of the Baidu word records.
    #[arg(long, value_name = "OFFSET", value_parser = parse_offset, default_value_t = BAIDU_START_OFFSET)]
    pub baidu_offset: usize,

    /// Start of the Sogou pinyin table.
    #[arg(long, value_name = "OFFSET", value_parser = parse_offset, default_value_t = SCEL_START_PY)]
    pub scel_py_offset: usize,

    /// Start of the Sogou word groups.
    #[arg(long, value_name = "OFFSET", value_parser = parse_offset, default_value_t = SCEL_START_CHINESE)]
    pub scel_chinese_offset: usize,
}

impl Cli {
    /// neither --baidu nor --sogou means both
    pub fn formats(&self) -> Vec<DictFormat> {
        match (self.baidu, self.sogou) {
            (true, false) => vec![DictFormat::Baidu],
            (false, true) => vec![DictFormat::Sogou],
            _ => vec![DictFormat::Baidu, DictFormat::Sogou],
        }
    }

    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            root: self.dir.clone(),
            recurse: self.recurse,
            formats: self.formats(),
            outputs: Outputs {
                txt: !self.no_txt,
                rime: !self.no_rime,
                json: self.json,
            },
            rime_name: match &self.rime_name {
                Some(name) => RimeName::Fixed(name.clone()),
                None => RimeName::Basename,
            },
            offsets: Offsets {
                baidu_start: self.baidu_offset,
                scel_py: self.scel_py_offset,
                scel_chinese: self.scel_chinese_offset,
            },
        }
    }
}

fn walk_dir(path: &Path, found: &mut Vec<PathBuf>, recurse: bool, formats: &[DictFormat]) -> Result<()> {
    for entry in
        read_dir(path).with_context(|| format!("Failed to read directory: {}", path.display()))?
    {
        let path = entry?.path();

        if path.is_file() {
            if let Some(format) = DictFormat::from_path(&path) {
                if formats.contains(&format) {
                    found.push(path);
                }
            }
        } else if recurse && path.is_dir() {
            walk_dir(&path, found, recurse, formats)?;
        }
    }
    Ok(())
}

/// dictionary files of the enabled formats under `root`, sorted by path
pub fn collect_inputs(root: &Path, recurse: bool, formats: &[DictFormat]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk_dir(root, &mut found, recurse, formats)?;
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_enable_everything() {
        let cli = Cli::parse_from(["ime-dict", "dicts"]);
        let opts = cli.to_options();
        assert_eq!(opts.formats, vec![DictFormat::Baidu, DictFormat::Sogou]);
        assert!(opts.outputs.txt && opts.outputs.rime && !opts.outputs.json);
        assert_eq!(opts.offsets, Offsets::default());
        assert_eq!(opts.rime_name, RimeName::Basename);
        assert!(!opts.recurse);
    }

    #[test]
    fn flags_and_hex_offsets() {
        let cli = Cli::parse_from([
            "ime-dict",
            "dicts",
            "-r",
            "--sogou",
            "--no-txt",
            "--rime-name",
            "custom_dict",
            "--scel-py-offset",
            "0x10",
            "--baidu-offset",
            "32",
        ]);
        let opts = cli.to_options();
        assert!(opts.recurse);
        assert_eq!(opts.formats, vec![DictFormat::Sogou]);
        assert!(!opts.outputs.txt);
        assert_eq!(opts.rime_name, RimeName::Fixed("custom_dict".into()));
        assert_eq!(opts.offsets.scel_py, 0x10);
        assert_eq!(opts.offsets.baidu_start, 32);
        assert_eq!(opts.offsets.scel_chinese, SCEL_START_CHINESE);
    }

    #[test]
    fn bad_offset_is_rejected() {
        assert!(Cli::try_parse_from(["ime-dict", "d", "--baidu-offset", "0xgg"]).is_err());
    }

    #[test]
    fn collects_only_enabled_formats() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sub = dir.path().join("sub");
        fs::create_dir(&sub)?;
        fs::write(dir.path().join("b.bdict"), b"")?;
        fs::write(dir.path().join("a.SCEL"), b"")?;
        fs::write(dir.path().join("notes.txt"), b"")?;
        fs::write(sub.join("c.bcd"), b"")?;

        let flat = collect_inputs(dir.path(), false, &[DictFormat::Baidu, DictFormat::Sogou])?;
        assert_eq!(flat, vec![dir.path().join("a.SCEL"), dir.path().join("b.bdict")]);

        let deep = collect_inputs(dir.path(), true, &[DictFormat::Baidu])?;
        assert_eq!(deep, vec![dir.path().join("b.bdict"), sub.join("c.bcd")]);
        Ok(())
    }
}
