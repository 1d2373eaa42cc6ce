use iconsext_lib::exporter::{self, ConflictPolicy, OverwriteChoice, SilentProgress};
use iconsext_lib::{ContainerDecoder, ExportSession, IconCatalog};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("iconsext-it-{}-{}", tag, uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("create temp dir: {}", e));
    dir
}

fn sample_ico(sizes: &[u32]) -> Vec<u8> {
    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    for &size in sizes {
        let rgba: Vec<u8> = (0..size * size)
            .flat_map(|i| [(i * 7 % 256) as u8, 128, 64, 255])
            .collect();
        let image = ico::IconImage::from_rgba_data(size, size, rgba);
        dir.add_entry(ico::IconDirEntry::encode(&image).unwrap_or_else(|e| panic!("encode: {}", e)));
    }
    let mut bytes = Vec::new();
    dir.write(&mut bytes).unwrap_or_else(|e| panic!("write ico: {}", e));
    bytes
}

fn refuse_prompt(path: &Path) -> OverwriteChoice {
    panic!("unexpected prompt for {}", path.display())
}

/// 一个可解码文件 (两条记录) 加一个不可解码文件
fn sample_source() -> PathBuf {
    let source = temp_dir("source");
    fs::write(source.join("good.ico"), sample_ico(&[16, 32])).unwrap_or_else(|e| panic!("{}", e));
    fs::write(source.join("broken.dll"), b"MZ but nothing else").unwrap_or_else(|e| panic!("{}", e));
    source
}

#[test]
fn catalog_then_export_writes_one_png_per_entry() {
    let source = sample_source();
    let destination = temp_dir("dest");

    let mut catalog = IconCatalog::new();
    let totals = catalog
        .rebuild(&source, false, &ContainerDecoder::new())
        .unwrap_or_else(|e| panic!("rebuild: {}", e));
    assert_eq!(catalog.len(), 2);
    assert_eq!(totals.icon_count, 2);
    assert_eq!(totals.file_count, 2);

    let selected = catalog.select_all();
    let summary = exporter::export_icons(
        &selected,
        &destination,
        &mut ExportSession::new(),
        &mut refuse_prompt,
        &mut SilentProgress,
    )
    .unwrap_or_else(|e| panic!("export: {}", e));

    assert_eq!(summary.files_written, 2);
    let mut written: Vec<String> = fs::read_dir(&destination)
        .unwrap_or_else(|e| panic!("{}", e))
        .flatten()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    written.sort();
    assert_eq!(written, ["good_0_1.png", "good_0_2.png"]);

    for entry in catalog.entries() {
        let png = image::open(destination.join(format!("{}.png", entry.export_base_name)))
            .unwrap_or_else(|e| panic!("reopen: {}", e));
        assert_eq!(png.width(), entry.pixel_buffer.width);
        assert_eq!(png.to_rgba8().into_raw(), entry.pixel_buffer.samples);
    }

    let _ = fs::remove_dir_all(&source);
    let _ = fs::remove_dir_all(&destination);
}

#[test]
fn second_export_with_skip_policy_writes_nothing() {
    let source = sample_source();
    let destination = temp_dir("rerun");

    let mut catalog = IconCatalog::new();
    catalog
        .rebuild(&source, false, &ContainerDecoder::new())
        .unwrap_or_else(|e| panic!("rebuild: {}", e));
    let selected = catalog.select_all();

    let first = exporter::export_icons(
        &selected,
        &destination,
        &mut ExportSession::new(),
        &mut refuse_prompt,
        &mut SilentProgress,
    )
    .unwrap_or_else(|e| panic!("{}", e));
    assert_eq!(first.files_written, 2);

    let second = exporter::export_icons(
        &selected,
        &destination,
        &mut ExportSession::with_policy(ConflictPolicy::Skip),
        &mut refuse_prompt,
        &mut SilentProgress,
    )
    .unwrap_or_else(|e| panic!("{}", e));
    assert_eq!(second.files_written, 0);
    assert_eq!(second.skipped, 2);

    let _ = fs::remove_dir_all(&source);
    let _ = fs::remove_dir_all(&destination);
}

#[tokio::test]
async fn recursive_parallel_build_sees_nested_files() {
    let source = sample_source();
    fs::create_dir_all(source.join("nested")).unwrap_or_else(|e| panic!("{}", e));
    fs::write(source.join("nested").join("extra.ico"), sample_ico(&[48]))
        .unwrap_or_else(|e| panic!("{}", e));

    let mut catalog = IconCatalog::new();
    let shallow = catalog
        .rebuild_parallel(&source, false, Arc::new(ContainerDecoder::new()))
        .await
        .unwrap_or_else(|e| panic!("{}", e));
    assert_eq!(shallow.icon_count, 2);

    let deep = catalog
        .rebuild_parallel(&source, true, Arc::new(ContainerDecoder::new()))
        .await
        .unwrap_or_else(|e| panic!("{}", e));
    assert_eq!(deep.icon_count, 3);
    assert_eq!(deep.file_count, 3);
    assert!(catalog.entries().iter().any(|e| e.display_name == "extra (1)"));

    let _ = fs::remove_dir_all(&source);
}
