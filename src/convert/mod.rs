use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info, warn};

use crate::config::Offsets;
use crate::export::{write_json_file, write_rime_file, write_words_file};
use crate::ime::{Decoded, DictFormat};
use crate::util::cli::collect_inputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outputs {
    pub txt: bool,
    pub rime: bool,
    pub json: bool,
}

impl Default for Outputs {
    fn default() -> Self {
        Outputs {
            txt: true,
            rime: true,
            json: false,
        }
    }
}

/// name written into the Rime header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RimeName {
    /// input file name without extension
    Basename,
    Fixed(String),
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub root: PathBuf,
    pub recurse: bool,
    pub formats: Vec<DictFormat>,
    pub outputs: Outputs,
    pub rime_name: RimeName,
    pub offsets: Offsets,
}

impl ConvertOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ConvertOptions {
            root: root.into(),
            recurse: false,
            formats: vec![DictFormat::Baidu, DictFormat::Sogou],
            outputs: Outputs::default(),
            rime_name: RimeName::Basename,
            offsets: Offsets::default(),
        }
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub format: DictFormat,
    pub entries: usize,
    // decoding stopped before the end of the file
    pub halted: bool,
    pub written: Vec<PathBuf>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub scanned: usize,
    pub converted: usize,
}

/// read and decode one file, early termination is logged and not an error
pub fn decode_file(path: &Path, format: DictFormat, offsets: &Offsets) -> Result<Decoded> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let decoded = format.decode(&data, offsets);
    if let Some(e) = &decoded.halted {
        warn!(
            "{}: decoding stopped early after {} entries: {}",
            path.display(),
            decoded.entries.len(),
            e
        );
    }
    Ok(decoded)
}

/// `dir/name` + `.txt` -> `dir/name.txt`, dots inside `name` are kept
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

pub fn convert_file(path: &Path, opts: &ConvertOptions) -> Result<FileReport> {
    let format = DictFormat::from_path(path)
        .with_context(|| format!("Not a Baidu or Sogou dictionary: {}", path.display()))?;
    let decoded = decode_file(path, format, &opts.offsets)?;
    let entries = &decoded.entries;

    let base = path.with_extension("");
    let mut written = vec![];

    if opts.outputs.txt {
        let out = with_suffix(&base, ".txt");
        write_words_file(entries, &out)?;
        written.push(out);
    }
    if opts.outputs.rime {
        let name = match &opts.rime_name {
            RimeName::Fixed(name) => name.clone(),
            RimeName::Basename => base
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let out = with_suffix(&base, ".dict.yaml");
        write_rime_file(entries, &name, &out)?;
        written.push(out);
    }
    if opts.outputs.json {
        let out = with_suffix(&base, ".json");
        write_json_file(entries, &out)?;
        written.push(out);
    }

    Ok(FileReport {
        format,
        entries: entries.len(),
        halted: decoded.halted.is_some(),
        written,
    })
}

/// Convert every enabled dictionary under `opts.root`.
///
/// A file that fails is logged and skipped, the rest of the batch still runs.
pub fn convert_dir(opts: &ConvertOptions) -> Result<Summary> {
    let inputs = collect_inputs(&opts.root, opts.recurse, &opts.formats)?;
    let mut summary = Summary::default();

    for path in inputs {
        summary.scanned += 1;
        match convert_file(&path, opts) {
            Ok(report) => {
                summary.converted += 1;
                let outs: Vec<String> = report.written.iter().map(|p| p.display().to_string()).collect();
                info!(
                    "[OK] {} -> {}  ({} entries)",
                    report.format.label(),
                    outs.join(", "),
                    report.entries
                );
            }
            Err(e) => error!("[ERR] {}: {:#}", path.display(), e),
        }
    }
    info!("done. scanned={} converted={}", summary.scanned, summary.converted);
    Ok(summary)
}

#[test]
fn with_suffix_keeps_inner_dots() {
    let base = Path::new("dicts/v1.2").to_path_buf();
    assert_eq!(with_suffix(&base, ".dict.yaml"), PathBuf::from("dicts/v1.2.dict.yaml"));
    assert_eq!(
        with_suffix(&Path::new("dicts/v1.2.scel").with_extension(""), ".txt"),
        PathBuf::from("dicts/v1.2.txt")
    );
}
