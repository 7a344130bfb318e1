//! Recording engine double shared by the controller tests.

use std::{
    cell::Cell,
    collections::HashMap,
    sync::{Arc, Mutex},
};

use shared::{
    CodecIndex, EngineError, EngineSession, GraphicsEngine, RawCodecInfo, RenderedFrame, Step,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Construct { handle: u32, len: usize },
    Release(u32),
    ResizeToFit(u32),
    Render(u32),
    RefreshStatus(u32),
    StepWidth(u32, Step),
    StepHeight(u32, Step),
    StepTile(u32, Step),
    StepPixel(u32, Step),
    StepByte(u32, Step),
    StepBit(u32, Step),
    StepRow(u32, Step, bool),
    JumpToOffset(u32, u64),
    SelectCodec(u32, CodecIndex),
    Export(u32),
}

impl EngineCall {
    pub fn handle(&self) -> u32 {
        match self {
            EngineCall::Construct { handle, .. } => *handle,
            EngineCall::Release(h)
            | EngineCall::ResizeToFit(h)
            | EngineCall::Render(h)
            | EngineCall::RefreshStatus(h)
            | EngineCall::StepWidth(h, _)
            | EngineCall::StepHeight(h, _)
            | EngineCall::StepTile(h, _)
            | EngineCall::StepPixel(h, _)
            | EngineCall::StepByte(h, _)
            | EngineCall::StepBit(h, _)
            | EngineCall::StepRow(h, _, _)
            | EngineCall::JumpToOffset(h, _)
            | EngineCall::SelectCodec(h, _)
            | EngineCall::Export(h) => *h,
        }
    }

    /// Whether this call changes what the session shows or where it points.
    pub fn is_command(&self) -> bool {
        !matches!(
            self,
            EngineCall::Construct { .. }
                | EngineCall::Release(_)
                | EngineCall::ResizeToFit(_)
                | EngineCall::Render(_)
                | EngineCall::RefreshStatus(_)
                | EngineCall::Export(_)
        )
    }
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<EngineCall>>>);

impl CallLog {
    fn push(&self, call: EngineCall) {
        self.0.lock().expect("call log").push(call);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.0.lock().expect("call log").clone()
    }

    pub fn clear(&self) {
        self.0.lock().expect("call log").clear();
    }

    pub fn commands(&self) -> Vec<EngineCall> {
        self.calls().into_iter().filter(EngineCall::is_command).collect()
    }

    pub fn live_handles(&self) -> usize {
        let calls = self.calls();
        let constructed = calls
            .iter()
            .filter(|call| matches!(call, EngineCall::Construct { .. }))
            .count();
        let released = calls
            .iter()
            .filter(|call| matches!(call, EngineCall::Release(_)))
            .count();
        constructed - released
    }

    /// Panics if any handle is released twice, used after release, or constructed
    /// while another handle is still live.
    pub fn assert_release_discipline(&self) {
        let mut released: HashMap<u32, usize> = HashMap::new();
        let mut live = 0usize;
        for call in self.calls() {
            let handle = call.handle();
            assert!(
                !released.contains_key(&handle) || matches!(call, EngineCall::Release(_)),
                "call {call:?} issued to released handle {handle}"
            );
            match call {
                EngineCall::Construct { .. } => {
                    live += 1;
                    assert!(live <= 1, "more than one live handle after {call:?}");
                }
                EngineCall::Release(_) => {
                    let count = released.entry(handle).or_default();
                    *count += 1;
                    assert_eq!(*count, 1, "handle {handle} released twice");
                    live -= 1;
                }
                _ => {}
            }
        }
    }
}

pub fn tiled_and_linear() -> Vec<RawCodecInfo> {
    vec![
        RawCodecInfo::new("nes", true),
        RawCodecInfo::new("lin-1bpp-msbfirst", false),
    ]
}

pub struct FakeEngine {
    codecs: Vec<RawCodecInfo>,
    log: CallLog,
    next_handle: Cell<u32>,
    reject_probe: bool,
    reject_construct: bool,
    export_bytes: Vec<u8>,
}

impl FakeEngine {
    pub fn new(codecs: Vec<RawCodecInfo>) -> Self {
        Self {
            codecs,
            log: CallLog::default(),
            next_handle: Cell::new(1),
            reject_probe: false,
            reject_construct: false,
            export_bytes: b"\x89PNG fake".to_vec(),
        }
    }

    pub fn rejecting_probe(mut self) -> Self {
        self.reject_probe = true;
        self
    }

    pub fn rejecting_construct(mut self) -> Self {
        self.reject_construct = true;
        self
    }

    pub fn with_export_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.export_bytes = bytes;
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl GraphicsEngine for FakeEngine {
    type Session = FakeSession;

    fn query_codecs(&self) -> Vec<RawCodecInfo> {
        self.codecs.clone()
    }

    fn probe(&self, bytes: &[u8]) -> Result<(), EngineError> {
        if self.reject_probe || bytes.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        Ok(())
    }

    fn construct(&self, bytes: Vec<u8>) -> Result<FakeSession, EngineError> {
        if self.reject_construct {
            return Err(EngineError::Encode("construct refused".to_string()));
        }
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        self.log.push(EngineCall::Construct {
            handle,
            len: bytes.len(),
        });
        Ok(FakeSession {
            handle,
            data_len: bytes.len(),
            log: self.log.clone(),
            export_bytes: self.export_bytes.clone(),
            status: format!("handle {handle}"),
            frame: RenderedFrame::blank(1, 1),
        })
    }
}

pub struct FakeSession {
    handle: u32,
    data_len: usize,
    log: CallLog,
    export_bytes: Vec<u8>,
    status: String,
    frame: RenderedFrame,
}

impl EngineSession for FakeSession {
    fn resize_to_fit(&mut self) {
        self.log.push(EngineCall::ResizeToFit(self.handle));
    }

    fn render(&mut self) {
        self.log.push(EngineCall::Render(self.handle));
    }

    fn refresh_status(&mut self) {
        self.log.push(EngineCall::RefreshStatus(self.handle));
    }

    fn step_width(&mut self, step: Step) {
        self.log.push(EngineCall::StepWidth(self.handle, step));
    }

    fn step_height(&mut self, step: Step) {
        self.log.push(EngineCall::StepHeight(self.handle, step));
    }

    fn step_tile(&mut self, step: Step) {
        self.log.push(EngineCall::StepTile(self.handle, step));
    }

    fn step_pixel(&mut self, step: Step) {
        self.log.push(EngineCall::StepPixel(self.handle, step));
    }

    fn step_byte(&mut self, step: Step) {
        self.log.push(EngineCall::StepByte(self.handle, step));
    }

    fn step_bit(&mut self, step: Step) {
        self.log.push(EngineCall::StepBit(self.handle, step));
    }

    fn step_row(&mut self, step: Step, fast: bool) {
        self.log.push(EngineCall::StepRow(self.handle, step, fast));
    }

    fn jump_to_offset(&mut self, offset: u64) {
        self.log.push(EngineCall::JumpToOffset(self.handle, offset));
    }

    fn select_codec(&mut self, index: CodecIndex) {
        self.log.push(EngineCall::SelectCodec(self.handle, index));
    }

    fn export_encoded_image(&mut self) -> Result<Vec<u8>, EngineError> {
        self.log.push(EngineCall::Export(self.handle));
        Ok(self.export_bytes.clone())
    }

    fn data_len(&self) -> usize {
        self.data_len
    }

    fn release(self) {
        self.log.push(EngineCall::Release(self.handle));
    }

    fn status_line(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn frame(&self) -> Option<&RenderedFrame> {
        Some(&self.frame)
    }
}
