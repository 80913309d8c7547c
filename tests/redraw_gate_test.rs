use typing_rain::term::RedrawGate;

#[test]
fn redraw_gate_renders_first_frame() {
    let mut g = RedrawGate::new(250);
    assert!(g.should_render(0, 1, false));
}

#[test]
fn redraw_gate_static_renders_on_revision_change() {
    let mut g = RedrawGate::new(250);
    assert!(g.should_render(0, 1, false));
    assert!(g.should_render(1, 2, false));
}

#[test]
fn redraw_gate_static_throttles_when_unchanged() {
    let mut g = RedrawGate::new(250);
    assert!(g.should_render(0, 1, false));
    assert!(!g.should_render(10, 1, false));
    assert!(!g.should_render(249, 1, false));
    assert!(g.should_render(250, 1, false));
}

#[test]
fn redraw_gate_animating_always_renders() {
    let mut g = RedrawGate::new(250);
    assert!(g.should_render(0, 1, true));
    assert!(g.should_render(1, 1, true));
    assert!(g.should_render(2, 1, true));
}
