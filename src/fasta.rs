//src/fasta.rs

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{OtuTableError, Result};

/// Separator between an amplicon id and its abundance in a header.
pub const SIZE_SEPARATOR: &str = ";size=";

/// Opens a text file, decompressing it on the fly when it ends with `.gz`.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let f = File::open(path).map_err(|e| OtuTableError::io(path, e))?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Calls `f` with the 1-based line number and content of every non-blank
/// line, line terminator removed.
pub fn for_each_line<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, &str) -> Result<()>,
{
    let mut reader = open_reader(path)?;
    let mut line = String::new();
    let mut line_no = 0;

    loop {
        line.clear();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| OtuTableError::io(path, e))?;
        if n == 0 {
            break; // EOF
        }
        line_no += 1;

        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            continue;
        }
        f(line_no, content)?;
    }
    Ok(())
}

/// Strips the leading '>' and any '>' or ';' around a header.
pub fn normalize_header(line: &str) -> &str {
    line.trim_matches(|c| c == '>' || c == ';')
}

/// Splits `id;size=N` into `(id, "N")`. Returns `None` unless the header
/// carries exactly one size annotation.
pub fn split_size_annotation(header: &str) -> Option<(&str, &str)> {
    let (id, size) = header.split_once(SIZE_SEPARATOR)?;
    if size.contains(SIZE_SEPARATOR) {
        return None;
    }
    Some((id, size))
}

/// A FASTA record; the sequence is the concatenation of all its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub header: String,
    pub seq: String,
}

/// Reads every header line (without the '>') with its line number. Sequence
/// lines are skipped.
pub fn for_each_header<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, &str) -> Result<()>,
{
    for_each_line(path, |line_no, line| {
        if line.starts_with('>') {
            f(line_no, line)
        } else {
            Ok(())
        }
    })
}

/// Reads a whole FASTA file into memory.
pub fn read_fasta_records(path: &Path) -> Result<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();

    for_each_line(path, |line_no, line| {
        if line.starts_with('>') {
            records.push(FastaRecord {
                header: line.to_string(),
                seq: String::new(),
            });
        } else {
            match records.last_mut() {
                Some(record) => record.seq.push_str(line.trim()),
                None => {
                    return Err(OtuTableError::parse(
                        path,
                        line_no,
                        "sequence data before the first '>' header",
                    ))
                }
            }
        }
        Ok(())
    })?;

    Ok(records)
}
