use std::fs;

use picon_engine::{convert_dir, enigma2_picons, BatchEvent, BatchSummary, ProgressSink};
use pretty_assertions::assert_eq;
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: BatchEvent) {
        if let BatchEvent::Message(text) = event {
            self.messages.lock().unwrap().push(text);
        }
    }
}

fn source_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

#[test]
fn picons_are_listed_in_name_order() {
    let src = source_dir(&[
        ("1_0_1_6E_3EF_1_C00000_0_0_0.png", "b"),
        ("1_0_1_2_85_1_C00000_0_0_0.png", "a"),
        ("logo.png", "x"),
        ("notes.txt", "x"),
    ]);

    let names: Vec<_> = enigma2_picons(src.path())
        .unwrap()
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "1_0_1_2_85_1_C00000_0_0_0.png",
            "1_0_1_6E_3EF_1_C00000_0_0_0.png"
        ]
    );
}

#[test]
fn converts_and_copies_under_neutrino_names() {
    let src = source_dir(&[
        ("1_0_1_2_85_1_C00000_0_0_0.png", "first"),
        ("1_0_1_6E_3EF_1_C00000_0_0_0.png", "second"),
        ("plain.png", "ignored"),
    ]);
    let dest = TempDir::new().unwrap();
    let out = dest.path().join("neutrino");
    let sink = RecordingSink::default();

    let summary = convert_dir(src.path(), &out, &sink);

    assert_eq!(
        summary,
        BatchSummary {
            succeeded: 2,
            failed: 0
        }
    );
    assert_eq!(fs::read(out.join("8500010002.png")).unwrap(), b"first");
    assert_eq!(fs::read(out.join("3ef0001006e.png")).unwrap(), b"second");
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    assert_eq!(
        *sink.messages.lock().unwrap(),
        vec![
            "Converting \"1_0_1_2_85_1_C00000_0_0_0.png\" to \"8500010002.png\"".to_string(),
            "Converting \"1_0_1_6E_3EF_1_C00000_0_0_0.png\" to \"3ef0001006e.png\"".to_string(),
        ]
    );
}

#[test]
fn bad_file_is_reported_and_skipped() {
    let src = source_dir(&[
        ("1_0_1_XY_85_1_C00000_0_0_0.png", "bad"),
        ("1_0_1_2_85_1_C00000_0_0_0.png", "good"),
    ]);
    let dest = TempDir::new().unwrap();
    let sink = RecordingSink::default();

    let summary = convert_dir(src.path(), dest.path(), &sink);

    assert_eq!(
        summary,
        BatchSummary {
            succeeded: 1,
            failed: 1
        }
    );
    assert!(dest.path().join("8500010002.png").exists());
    let messages = sink.messages.lock().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].starts_with("Converting \"1_0_1_XY_85_1_C00000_0_0_0.png\" error:"));
}

#[test]
fn missing_source_dir_is_reported() {
    let dest = TempDir::new().unwrap();
    let sink = RecordingSink::default();

    let summary = convert_dir(&dest.path().join("absent"), dest.path(), &sink);

    assert_eq!(summary, BatchSummary::default());
    let messages = sink.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Picons conversion error:"));
}
