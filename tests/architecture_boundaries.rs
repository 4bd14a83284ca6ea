use std::fs;
use std::path::{Path, PathBuf};

fn rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn rel(path: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    rel.replace('\\', "/")
}

#[test]
fn sysinfo_is_confined_to_the_provider() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        if rel(&file).starts_with("src/system/provider/") {
            continue;
        }
        let content = fs::read_to_string(&file).unwrap_or_default();
        if content.contains("sysinfo") {
            violations.push(format!("{} reaches past the provider boundary", rel(&file)));
        }
    }

    assert!(
        violations.is_empty(),
        "Provider layering violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn data_model_stays_runtime_free() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut violations = Vec::new();

    for name in ["src/system/snapshot.rs", "src/system/history.rs"] {
        let content = fs::read_to_string(root.join(name)).unwrap_or_default();
        for forbidden in ["tokio", "sysinfo"] {
            if content.contains(forbidden) {
                violations.push(format!("{name} imports forbidden dependency `{forbidden}`"));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Data model layering violations:\n{}",
        violations.join("\n")
    );
}
