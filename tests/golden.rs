use kywy_core::config::{BYTES_PER_ROW, DISPLAY_HEIGHT, FRAME_BYTES};
use kywy_core::display::{Color, Display, Object2DOptions, RecordingTransport, TextOptions};
use kywy_core::font::basic_8_pt;

/// A black square with "Hi" drawn over its lower edge in the default font
fn expected_frame() -> Vec<u8> {
    let mut frame = vec![0xffu8; FRAME_BYTES];
    for row in 10..30 {
        let start = row * BYTES_PER_ROW;
        frame[start + 1] = 0xc0;
        frame[start + 2] = 0x00;
        frame[start + 3] = 0x03;
    }
    // the last two text rows hang below the square
    frame[30 * BYTES_PER_ROW + 1] = 0xf7;
    frame[30 * BYTES_PER_ROW + 2] = 0x77;
    frame[31 * BYTES_PER_ROW + 1] = 0xf7;
    frame[31 * BYTES_PER_ROW + 2] = 0x63;
    frame
}

#[test]
fn square_with_text_matches_golden_frame() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut display = Display::new(RecordingTransport::default());
    display.setup().unwrap();
    display.fill_rectangle(10, 10, 20, 20, Object2DOptions::new().color(Color::Black));
    display.draw_text(12, 25, "Hi", TextOptions::new());

    let expected = expected_frame();
    assert_eq!(display.framebuffer().as_bytes()[..], expected[..]);

    display.update().unwrap();
    let transport = display.driver().transport();
    // setup sends a blank frame, update sends ours
    let frame_len = 1 + DISPLAY_HEIGHT * (BYTES_PER_ROW + 2) + 1;
    assert_eq!(transport.bytes.len(), 2 * frame_len);
    let sent = &transport.bytes[frame_len..];
    for (row, line) in sent[1..].chunks_exact(BYTES_PER_ROW + 2).enumerate() {
        let start = row * BYTES_PER_ROW;
        assert_eq!(line[1..=BYTES_PER_ROW], expected[start..start + BYTES_PER_ROW]);
    }
}

#[test]
fn builtin_font_resolves_ascii() {
    let font = basic_8_pt();
    assert_eq!(font.header().ascent, 7);

    let h = font.glyph(u16::from(b'H'));
    assert_eq!((h.bbox_width, h.bbox_height), (5, 7));
    assert!(!h.is_fallback());

    // outside the table the hollow box stands in
    assert!(font.glyph(0x263a).is_fallback());
    assert!(font.get(0x263a).is_none());
}
