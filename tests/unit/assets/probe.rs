use std::io::Cursor;

use super::*;

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn probe_png_dimensions() {
    assert_eq!(probe_image_size(&png(40, 8)).unwrap(), (40, 8));
}

#[test]
fn probe_file_dimensions() {
    let dir = std::path::PathBuf::from("target").join("probe_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("logo.png");
    std::fs::write(&path, png(12, 3)).unwrap();
    assert_eq!(probe_image_file(&path).unwrap(), (12, 3));
}

#[test]
fn garbage_bytes_fail() {
    assert!(probe_image_size(b"not an image").is_err());
}

#[test]
fn missing_font_reports_path() {
    let err = read_font_file(Path::new("does/not/exist.ttf")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.ttf"));
}
