use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn bios_font(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bios-font"))
        .args(args)
        .output()
        .expect("failed to run bios-font")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

/// 256 glyphs of 8x8 where every glyph is a filled block.
fn write_solid_font(path: &Path) {
    fs::write(path, vec![0xffu8; 256 * 8]).unwrap();
}

#[test]
fn grid_from_binary_font() {
    let dir = tempfile::tempdir().unwrap();
    let font = dir.path().join("font.rom");
    let out = dir.path().join("table.png");
    fs::write(&font, vec![0x81u8; 16 * 4]).unwrap();

    let output = bios_font(&["grid", path_arg(&font), "-o", path_arg(&out), "--scale", "2"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let image = image::open(&out).unwrap().to_rgb8();
    // 512 / 20 = 25 columns, 256 / 36 = 7 rows of 10x18 cells, doubled.
    assert_eq!(image.dimensions(), (500, 252));
    assert_eq!(image.get_pixel(0, 0), &image::Rgb([255, 255, 255]));
    assert_eq!(image.get_pixel(2, 0), &image::Rgb([0, 0, 0]));
}

#[test]
fn grid_from_inline_hex() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("table.bmp");

    let output = bios_font(&[
        "grid",
        "--hex",
        "0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00",
        "--format",
        "8x8",
        "--scale",
        "1",
        "--color",
        "red",
        "-o",
        path_arg(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let image = image::open(&out).unwrap().to_rgb8();
    assert_eq!(image.get_pixel(0, 0), &image::Rgb([255, 0, 0]));
}

#[test]
fn text_with_color_assignments() {
    let dir = tempfile::tempdir().unwrap();
    let font = dir.path().join("font.bin");
    let out = dir.path().join("text.png");
    write_solid_font(&font);

    let output = bios_font(&[
        "text",
        path_arg(&font),
        "--format",
        "8x8",
        "--scale",
        "1",
        "--text",
        "AB AB AB[2]",
        "--assign",
        "AB=#ff0000",
        "--assign",
        "AB[2]=blue",
        "-o",
        path_arg(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let image = image::open(&out).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (99, 8));
    assert_eq!(image.get_pixel(0, 0), &image::Rgb([255, 0, 0]));
    assert_eq!(image.get_pixel(27, 0), &image::Rgb([255, 0, 0]));
    assert_eq!(image.get_pixel(54, 0), &image::Rgb([0, 0, 255]));
}

#[test]
fn text_without_glyph_data_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("text.png");

    let output = bios_font(&["text", "--hex", "zz", "--text", "AB", "-o", path_arg(&out)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no glyph data loaded"));
    assert!(!out.exists());
}

#[test]
fn dump_round_trips_through_grid_input() {
    let dir = tempfile::tempdir().unwrap();
    let font = dir.path().join("font.bios");
    let hex = dir.path().join("font.txt");
    let bytes: Vec<u8> = (0..=255).collect();
    fs::write(&font, &bytes).unwrap();

    let output = bios_font(&["dump", path_arg(&font), "-o", path_arg(&hex)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = fs::read_to_string(&hex).unwrap();
    assert!(text.starts_with("0x00, 0x01, 0x02"));
    assert_eq!(bios_font::hex::parse_bytes(&text), bytes);
}

#[test]
fn batch_renders_every_rom() {
    let dir = tempfile::tempdir().unwrap();
    let fonts = dir.path().join("fonts");
    let out = dir.path().join("out");
    fs::create_dir_all(fonts.join("nested")).unwrap();
    write_solid_font(&fonts.join("a.bin"));
    write_solid_font(&fonts.join("nested/b.rom"));
    write_solid_font(&fonts.join("nested/a.bios"));
    fs::write(fonts.join("notes.txt"), "not a font").unwrap();

    let output = bios_font(&["batch", path_arg(&fonts), "--out-dir", path_arg(&out)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("a.png").exists());
    assert!(out.join("nested/b.png").exists());
    assert!(out.join("nested/a.png").exists());
    assert!(!out.join("notes.png").exists());
}

#[test]
fn batch_refuses_to_overwrite_images() {
    let dir = tempfile::tempdir().unwrap();
    let fonts = dir.path().join("fonts");
    let out = dir.path().join("out");
    fs::create_dir_all(&fonts).unwrap();
    write_solid_font(&fonts.join("vga.bin"));
    write_solid_font(&fonts.join("vga.rom"));

    let output = bios_font(&["batch", path_arg(&fonts), "--out-dir", path_arg(&out)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("would overwrite"));
    assert!(!out.join("vga.png").exists());
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("render.toml");
    let font = dir.path().join("font.bin");
    let out = dir.path().join("table.png");
    fs::write(&config, "scale = 1\nwidth = 20\nheight = 20\nformat = \"8x8\"\n").unwrap();
    write_solid_font(&font);

    let output =
        bios_font(&["--config", path_arg(&config), "grid", path_arg(&font), "-o", path_arg(&out)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let image = image::open(&out).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (20, 20));
}

#[test]
fn presets_are_listed() {
    let output = bios_font(&["presets"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Orange"));
    assert!(stdout.contains("#ffa100"));
}
