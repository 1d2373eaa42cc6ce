use crate::modules::common::error::ExtractorError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 列出目录下的所有非目录项
///
/// `recurse` 为 false 时只取直接子项。遍历按文件名排序，
/// 同一文件系统状态下输出顺序固定。
pub fn list_directory_files(dir: &Path, recurse: bool) -> Result<Vec<PathBuf>, ExtractorError> {
    let max_depth = if recurse { usize::MAX } else { 1 };

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("跳过无法访问的路径: {}", e);
                continue;
            }
        };

        // 指向目录的符号链接同样视为目录
        let path = entry.path();
        if entry.file_type().is_dir() || path.is_dir() {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_tree(test_name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "iconsext-scan-test-{}-{}",
            test_name,
            uuid::Uuid::new_v4()
        ));
        assert!(fs::create_dir_all(root.join("nested").join("deeper")).is_ok());
        assert!(fs::write(root.join("b.ico"), b"b").is_ok());
        assert!(fs::write(root.join("a.dll"), b"a").is_ok());
        assert!(fs::write(root.join("nested").join("c.exe"), b"c").is_ok());
        assert!(fs::write(root.join("nested").join("deeper").join("d.icl"), b"d").is_ok());
        root
    }

    #[test]
    fn shallow_listing_skips_subdirectories() {
        let root = temp_tree("shallow");

        let files = list_directory_files(&root, false).unwrap_or_default();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap_or_default().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.dll", "b.ico"]);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn recursive_listing_includes_all_depths() {
        let root = temp_tree("recursive");

        let files = list_directory_files(&root, true).unwrap_or_default();
        assert_eq!(files.len(), 4);
        assert!(files.contains(&root.join("nested").join("c.exe")));
        assert!(files.contains(&root.join("nested").join("deeper").join("d.icl")));
        assert!(files.iter().all(|p| !p.is_dir()));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn listing_order_is_stable() {
        let root = temp_tree("stable");

        let first = list_directory_files(&root, true).unwrap_or_default();
        let second = list_directory_files(&root, true).unwrap_or_default();
        assert_eq!(first, second);

        let _ = fs::remove_dir_all(&root);
    }
}
