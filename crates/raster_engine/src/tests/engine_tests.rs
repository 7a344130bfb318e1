use super::*;
use shared::{CodecIndex, EngineSession};

#[test]
fn codec_catalog_follows_table_order() {
    let codecs = RasterEngine::default().query_codecs();
    assert_eq!(
        codecs,
        vec![
            RawCodecInfo::new("nes", true),
            RawCodecInfo::new("lin-1bpp-msbfirst", false),
            RawCodecInfo::new("lin-1bpp-lsbfirst", false),
        ]
    );
}

#[test]
fn empty_input_is_rejected() {
    let engine = RasterEngine::default();
    assert_eq!(engine.probe(&[]), Err(EngineError::EmptyInput));
    assert!(matches!(
        engine.construct(Vec::new()),
        Err(EngineError::EmptyInput)
    ));
}

#[test]
fn constructed_session_starts_on_first_codec() {
    let engine = RasterEngine::new(CanvasBounds {
        width_px: 64,
        height_px: 32,
    });
    let mut session = engine.construct(vec![1, 2, 3]).expect("session");
    session.resize_to_fit();

    assert_eq!(session.codec_identifier(), "nes");
    assert_eq!(session.geometry(), (8, 4));
    assert_eq!(session.data_len(), 3);

    session.select_codec(CodecIndex(2));
    assert_eq!(session.geometry(), (64, 32));
    session.release();
}
