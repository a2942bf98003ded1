//! Shared record builders for integration tests.

use dirmap::FileRecord;

pub fn code_file(path: &str, language: &str, code: u64) -> FileRecord {
    FileRecord::new(path, language).with_lines(code, 0, 0)
}

/// Wide and moderately deep synthetic repository.
pub fn synthetic_repo(top_level: usize, per_dir: usize) -> Vec<FileRecord> {
    let mut records = Vec::new();
    for top in 0..top_level {
        for nested in 0..3 {
            for file in 0..per_dir {
                let path = format!("pkg{top}/mod{nested}/deep{}/f{file}.rs", file % 2);
                let code = ((top * 37 + nested * 11 + file * 7) % 400 + 1) as u64;
                records.push(
                    FileRecord::new(path, "Rust")
                        .with_lines(code, code / 5, code / 10)
                        .with_complexity(code / 20)
                        .with_bytes(code * 30),
                );
            }
        }
    }
    records.push(code_file("README.md", "Markdown", 40));
    records
}
