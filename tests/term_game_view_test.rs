use falling_blocks::core::{ClearingSnapshot, ScriptedSource, Session, Snapshot};
use falling_blocks::term::{block_rgb, AnchorY, FrameBuffer, GameView, Viewport};
use falling_blocks::types::{BlockColor, Command, ShapeKind};

fn snapshot_of(kind: ShapeKind) -> Snapshot {
    Session::try_new(Default::default(), ScriptedSource::repeat(kind))
        .unwrap()
        .snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = Session::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // field pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    assert_eq!(view.frame_size(&snap), (22, 22));
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_as_two_chars_wide() {
    let mut snap = Session::new(1).snapshot();
    snap.cells[19 * 10] = Some(BlockColor::Orange);
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, block_rgb(BlockColor::Orange));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece() {
    let snap = snapshot_of(ShapeKind::I);
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // I spawns at (3, 0): columns 3..7 map to x = 7..15 on row 1.
    for x in 7..15 {
        let cell = fb.get(x, 1).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, block_rgb(BlockColor::Cyan));
    }
    assert_eq!(fb.get(5, 1).unwrap().ch, '·');
}

#[test]
fn term_view_fades_clearing_rows() {
    let mut snap = Session::new(1).snapshot();
    snap.active = None;
    for x in 0..10 {
        snap.cells[19 * 10 + x] = Some(BlockColor::Red);
    }
    snap.cells[18 * 10] = Some(BlockColor::Red);

    let view = GameView::default();
    let vp = Viewport::new(22, 22);

    snap.clearing = Some(ClearingSnapshot {
        rows: vec![19],
        progress: 1.0,
    });
    let fb = view.render(&snap, vp);
    let start = fb.get(1, 20).unwrap();
    assert_eq!(start.style.fg, block_rgb(BlockColor::Red));
    assert!(!start.style.dim);

    snap.clearing = Some(ClearingSnapshot {
        rows: vec![19],
        progress: 0.3,
    });
    let fb = view.render(&snap, vp);
    let late = fb.get(1, 20).unwrap();
    assert_eq!(late.ch, '█');
    assert!(late.style.dim);
    assert_ne!(late.style.fg, block_rgb(BlockColor::Red));

    // Rows that are not clearing keep their color.
    let other = fb.get(1, 19).unwrap();
    assert_eq!(other.style.fg, block_rgb(BlockColor::Red));
    assert!(!other.style.dim);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = snapshot_of(ShapeKind::T);
    snap.score = 1200;

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("1200"));
    assert!(all.contains("NEXT"));

    let narrow = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(!screen_text(&narrow).contains("SCORE"));
}

#[test]
fn term_view_shows_pause_overlay() {
    let mut session = Session::new(1);
    session.apply_command(Command::TogglePause);
    let fb = GameView::default().render(&session.snapshot(), Viewport::new(22, 22));

    let all = screen_text(&fb);
    assert!(all.contains("PAUSED"));
    assert!(all.contains("Press P to resume"));
    assert!(!all.contains("GAME OVER"));
}

#[test]
fn term_view_shows_game_over_with_final_score() {
    let mut snap = Session::new(1).snapshot();
    snap.game_over = true;
    snap.active = None;
    snap.score = 300;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let all = screen_text(&fb);
    assert!(all.contains("GAME OVER"));
    assert!(all.contains("Final Score: 300"));
    assert!(all.contains("Press R to restart"));
}

#[test]
fn term_view_centers_field_by_default_on_tall_viewports() {
    let snap = Session::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_field_to_top() {
    let snap = Session::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = Session::new(1).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(10, 10);

    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    assert_eq!(fb, view.render(&snap, Viewport::new(40, 24)));
}

#[test]
fn term_view_prefers_game_over_to_pause_overlay() {
    let mut snap = Session::new(1).snapshot();
    snap.game_over = true;
    snap.paused = true;
    snap.active = None;

    let all = screen_text(&GameView::default().render(&snap, Viewport::new(22, 22)));
    assert!(all.contains("GAME OVER"));
    assert!(!all.contains("PAUSED"));
}
