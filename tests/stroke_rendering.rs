use egui::{Color32, Pos2};
use whiteboard::{ToolKind, Whiteboard, tool};

fn red_board() -> Whiteboard {
    let mut board = Whiteboard::new(100, 100);
    board.tool_mut().set_active_color(tool::parse_hex_color("#ff0000").unwrap());
    board.tool_mut().set_stroke_width(4);
    board
}

#[test]
fn test_red_line_of_width_four() {
    let mut board = red_board();
    board.begin_stroke(Pos2::new(10.0, 10.0));
    board.extend_stroke(Pos2::new(50.0, 50.0));
    board.end_stroke();

    let red = Color32::from_rgb(255, 0, 0);
    let surface = board.surface();

    // Along the diagonal, both ends included
    for i in 10..50 {
        assert_eq!(surface.pixel(i, i), Some(red), "pixel ({i}, {i})");
    }
    // 1.4px off the line is inside the 2px radius, 2.8px is outside
    assert_eq!(surface.pixel(31, 29), Some(red));
    assert_eq!(surface.pixel(32, 28), Some(Color32::WHITE));
    // Far away stays blank
    assert_eq!(surface.pixel(80, 20), Some(Color32::WHITE));
    assert_eq!(surface.pixel(70, 70), Some(Color32::WHITE));

    // The one snapshot is of the blank surface
    let snapshot = board.history().last().unwrap().decode().unwrap();
    assert!(snapshot.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    assert_eq!(board.history().len(), 1);
}

#[test]
fn test_single_point_stroke_leaves_no_mark() {
    let mut board = red_board();
    board.begin_stroke(Pos2::new(40.0, 40.0));
    board.end_stroke();

    assert!(board.surface().is_blank());
    // Still counts as a stroke for undo purposes
    assert_eq!(board.history().len(), 1);
}

#[test]
fn test_extend_without_open_stroke_is_noop() {
    let mut board = red_board();
    assert!(!board.extend_stroke(Pos2::new(10.0, 10.0)));
    board.end_stroke();
    assert!(board.surface().is_blank());
    assert!(board.history().is_empty());
}

#[test]
fn test_out_of_bounds_points_are_accepted() {
    let mut board = red_board();
    board.begin_stroke(Pos2::new(-30.0, -30.0));
    assert!(board.extend_stroke(Pos2::new(-10.0, -20.0)));
    board.end_stroke();
    assert!(board.surface().is_blank());
    assert_eq!(board.history().len(), 1);
}

#[test]
fn test_eraser_paints_background_and_keeps_color() {
    let mut board = red_board();
    board.begin_stroke(Pos2::new(10.0, 50.0));
    board.extend_stroke(Pos2::new(90.0, 50.0));
    board.end_stroke();

    board.tool_mut().select(ToolKind::Eraser);
    board.tool_mut().set_stroke_width(20);
    board.begin_stroke(Pos2::new(0.0, 50.0));
    board.extend_stroke(Pos2::new(100.0, 50.0));
    board.end_stroke();

    assert!(board.surface().is_blank());
    assert_eq!(board.tool().active_color(), Color32::from_rgb(255, 0, 0));

    board.tool_mut().select(ToolKind::Pen);
    assert_eq!(board.tool().effective_color(), Color32::from_rgb(255, 0, 0));
}

#[test]
fn test_tool_changes_mid_stroke_apply_to_next_stroke() {
    let mut board = red_board();
    board.begin_stroke(Pos2::new(10.0, 20.0));
    board.tool_mut().set_active_color(Color32::BLUE);
    board.extend_stroke(Pos2::new(90.0, 20.0));
    board.end_stroke();
    assert_eq!(board.surface().pixel(50, 20), Some(Color32::from_rgb(255, 0, 0)));

    board.begin_stroke(Pos2::new(10.0, 60.0));
    board.extend_stroke(Pos2::new(90.0, 60.0));
    board.end_stroke();
    assert_eq!(board.surface().pixel(50, 60), Some(Color32::BLUE));
}
