//! The task file: `{"examples": [{"input": ..., "target": ...}, ...]}`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use matrixshapes_core::Example;
use serde::{Deserialize, Serialize};

use crate::TaskError;

/// One input/target pair as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskExample {
    pub input: String,
    pub target: String,
}

impl From<Example> for TaskExample {
    fn from(example: Example) -> Self {
        Self {
            input: example.input,
            target: example.target,
        }
    }
}

/// The persisted collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFile {
    pub examples: Vec<TaskExample>,
}

impl TaskFile {
    /// Write as pretty-printed JSON (two-space indent).
    pub fn write(&self, path: &Path) -> Result<(), TaskError> {
        let io_err = |source| TaskError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, TaskError> {
        let file = File::open(path).map_err(|source| TaskError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
