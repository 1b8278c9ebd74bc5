use egui::{Color32, Pos2};
use whiteboard::{MemorySink, Whiteboard, WhiteboardConfig};

#[test]
fn test_export_blank_surface() {
    let board = Whiteboard::new(120, 80);
    let mut sink = MemorySink::new();
    board.export_image(&mut sink).unwrap();

    assert_eq!(sink.downloads.len(), 1);
    let (name, bytes) = &sink.downloads[0];
    assert_eq!(name, "whiteboard.png");

    let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(image.dimensions(), (120, 80));
    assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_export_is_a_pure_read() {
    let mut board = Whiteboard::new(50, 50);
    board.tool_mut().set_active_color(Color32::GREEN);
    board.begin_stroke(Pos2::new(5.0, 5.0));
    board.extend_stroke(Pos2::new(45.0, 45.0));
    board.end_stroke();

    let revision = board.surface().revision();
    let history = board.history().len();

    let mut sink = MemorySink::new();
    board.export_image(&mut sink).unwrap();
    board.export_image(&mut sink).unwrap();

    assert_eq!(board.surface().revision(), revision);
    assert_eq!(board.history().len(), history);

    let exported = image::load_from_memory(&sink.downloads[1].1).unwrap().to_rgba8();
    assert_eq!(&exported, board.surface().pixels());
}

#[test]
fn test_export_uses_configured_file_name() {
    let config = WhiteboardConfig::from_json_str(r#"{ "export_file_name": "sketch.png" }"#).unwrap();
    let board = Whiteboard::with_config([10, 10], &config);

    let mut sink = MemorySink::new();
    board.export_image(&mut sink).unwrap();
    assert_eq!(sink.last().unwrap().0, "sketch.png");
}
