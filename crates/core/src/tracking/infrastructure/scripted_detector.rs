use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::tracking::domain::face_detector::FaceDetector;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("failed to read detection script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid detection record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct RegionRecord {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

/// Replays pre-computed detections, one JSON array of boxes per line.
///
/// Keeps the real detector an external collaborator: any upstream process
/// can emit `[{"x":0,"y":0,"w":10,"h":10}, ...]` lines and this adapter
/// feeds them to the pipeline in frame order. Frames past the end of the
/// script detect nothing.
#[derive(Debug)]
pub struct ScriptedDetector {
    frames: VecDeque<Vec<Region>>,
}

impl ScriptedDetector {
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut frames = VecDeque::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let records: Vec<RegionRecord> = serde_json::from_str(line)
                .map_err(|source| ScriptError::Parse { line: i + 1, source })?;
            frames.push_back(
                records
                    .into_iter()
                    .map(|r| Region::new(r.x, r.y, r.w, r.h))
                    .collect(),
            );
        }
        Ok(Self { frames })
    }

    pub fn from_frames(frames: Vec<Vec<Region>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Scripted frames not yet consumed.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FaceDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn frame() -> Frame {
        Frame::new(vec![0u8; 16], 4, 4, 0)
    }

    fn write_script(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("detections.jsonl");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_replays_boxes_in_frame_order() {
        let tmp = TempDir::new().unwrap();
        let path = write_script(
            tmp.path(),
            "[{\"x\":1,\"y\":2,\"w\":3,\"h\":4}]\n[{\"x\":5,\"y\":6,\"w\":7,\"h\":8},{\"x\":9,\"y\":0,\"w\":1,\"h\":2}]\n",
        );

        let mut detector = ScriptedDetector::from_path(&path).unwrap();
        assert_eq!(detector.remaining(), 2);

        assert_eq!(detector.detect(&frame()).unwrap(), vec![Region::new(1, 2, 3, 4)]);
        assert_eq!(
            detector.detect(&frame()).unwrap(),
            vec![Region::new(5, 6, 7, 8), Region::new(9, 0, 1, 2)]
        );
    }

    #[test]
    fn test_empty_array_means_no_faces_that_frame() {
        let tmp = TempDir::new().unwrap();
        let path = write_script(tmp.path(), "[]\n[{\"x\":1,\"y\":1,\"w\":2,\"h\":2}]\n");

        let mut detector = ScriptedDetector::from_path(&path).unwrap();
        assert!(detector.detect(&frame()).unwrap().is_empty());
        assert_eq!(detector.detect(&frame()).unwrap().len(), 1);
    }

    #[test]
    fn test_exhausted_script_detects_nothing() {
        let mut detector = ScriptedDetector::from_frames(vec![vec![Region::new(0, 0, 2, 2)]]);
        detector.detect(&frame()).unwrap();
        assert!(detector.detect(&frame()).unwrap().is_empty());
        assert!(detector.detect(&frame()).unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = write_script(tmp.path(), "\n[{\"x\":1,\"y\":1,\"w\":2,\"h\":2}]\n\n");
        let detector = ScriptedDetector::from_path(&path).unwrap();
        assert_eq!(detector.remaining(), 1);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let tmp = TempDir::new().unwrap();
        let path = write_script(tmp.path(), "[]\nnot json\n");

        let err = ScriptedDetector::from_path(&path).unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_file_errors() {
        let err = ScriptedDetector::from_path(Path::new("/nonexistent/detections.jsonl"));
        assert!(matches!(err, Err(ScriptError::Read { .. })));
    }
}
