use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use picon_core::neutrino_file_name;
use picon_logging::{picon_error, picon_info};
use thiserror::Error;

use crate::fetch::ProgressSink;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::BatchSummary;

/// File-name suffix shared by every Enigma2 picon.
pub const ENIGMA2_PICON_SUFFIX: &str = "_0_0_0.png";

const SERVICE_ID_FIELD: usize = 3;
const TRANSPORT_ID_FIELD: usize = 4;
const NETWORK_ID_FIELD: usize = 5;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("not an Enigma2 picon name: {0}")]
    NotEnigma2Name(String),
    #[error("field {index} of {name} is not hexadecimal: {value:?}")]
    InvalidField {
        name: String,
        index: usize,
        value: String,
    },
    #[error("cannot read source directory {path:?}: {source}")]
    SourceDir { path: PathBuf, source: io::Error },
    #[error("cannot read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Neutrino file name for an Enigma2 picon name such as `1_0_1_2_85_1_0_0_0.png`.
pub fn neutrino_name_from_enigma2(file_name: &str) -> Result<String, ConvertError> {
    let stem = file_name
        .strip_suffix(".png")
        .filter(|_| file_name.ends_with(ENIGMA2_PICON_SUFFIX))
        .ok_or_else(|| ConvertError::NotEnigma2Name(file_name.to_string()))?;
    let fields: Vec<&str> = stem.split('_').collect();

    let hex_field = |index: usize| -> Result<u32, ConvertError> {
        let value = fields
            .get(index)
            .ok_or_else(|| ConvertError::NotEnigma2Name(file_name.to_string()))?;
        u32::from_str_radix(value, 16).map_err(|_| ConvertError::InvalidField {
            name: file_name.to_string(),
            index,
            value: value.to_string(),
        })
    };

    Ok(neutrino_file_name(
        hex_field(TRANSPORT_ID_FIELD)?,
        hex_field(NETWORK_ID_FIELD)?,
        hex_field(SERVICE_ID_FIELD)?,
    ))
}

/// Enigma2 picons directly under `src`, sorted by file name.
pub fn enigma2_picons(src: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let entries = fs::read_dir(src).map_err(|source| ConvertError::SourceDir {
        path: src.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConvertError::SourceDir {
            path: src.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_picon = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(ENIGMA2_PICON_SUFFIX));
        if is_picon && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy every Enigma2 picon of `src` into `dest` under its Neutrino name.
pub fn convert_dir(src: &Path, dest: &Path, sink: &dyn ProgressSink) -> BatchSummary {
    let mut summary = BatchSummary::default();
    let files = match enigma2_picons(src) {
        Ok(files) => files,
        Err(err) => {
            picon_error!("Picons conversion error: {}", err);
            sink.message(format!("Picons conversion error: {err}"));
            return summary;
        }
    };
    picon_info!("Converting {} picons from {:?} to {:?}", files.len(), src, dest);

    let writer = AtomicFileWriter::new(dest.to_path_buf());
    for file in &files {
        let source_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match convert_file(&writer, file, &source_name, sink) {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                picon_error!("Converting \"{}\" error: {}", source_name, err);
                sink.message(format!("Converting \"{source_name}\" error: {err}"));
                summary.failed += 1;
            }
        }
    }
    summary
}

fn convert_file(
    writer: &AtomicFileWriter,
    file: &Path,
    source_name: &str,
    sink: &dyn ProgressSink,
) -> Result<(), ConvertError> {
    let target_name = neutrino_name_from_enigma2(source_name)?;
    sink.message(format!("Converting \"{source_name}\" to \"{target_name}\""));
    let content = fs::read(file).map_err(|source| ConvertError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    writer.write(&target_name, &content)?;
    Ok(())
}
