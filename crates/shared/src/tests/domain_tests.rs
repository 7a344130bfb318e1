use super::*;

#[test]
fn backward_step_saturates_at_zero() {
    assert_eq!(Step::Backward.apply(3, 8), 0);
    assert_eq!(Step::Backward.apply(16, 8), 8);
}

#[test]
fn forward_step_saturates_at_max() {
    assert_eq!(Step::Forward.apply(usize::MAX - 1, 8), usize::MAX);
    assert_eq!(Step::Forward.apply(1, 1), 2);
}

#[test]
fn blank_frame_is_transparent_and_sized() {
    let frame = RenderedFrame::blank(3, 2);
    assert_eq!(frame.rgba.len(), 3 * 2 * 4);
    assert!(frame.rgba.iter().all(|byte| *byte == 0));
    assert!(!frame.is_empty());
    assert!(RenderedFrame::default().is_empty());
}
