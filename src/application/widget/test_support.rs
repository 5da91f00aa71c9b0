//! Port doubles and a harness for driving the widget in tests

use super::*;

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::application::ports::{EventEmitter, ObjectSource, ProbeElement, ReportedDuration};
use crate::domain::media::{Chunk, MediaType};
use crate::domain::recording::{RecorderState, RecordingSession};

// Recorder shared between the stream handle kept by a test and the boxed
// recorder owned by the widget
#[derive(Default)]
pub(super) struct RecorderShared {
    pub(super) session: Mutex<RecordingSession>,
    pub(super) events: EventEmitter<RecorderEvent>,
}

pub(super) struct MockRecorder {
    pub(super) shared: Arc<RecorderShared>,
}

#[async_trait]
impl MediaRecorder for MockRecorder {
    fn subscribe(&self) -> Subscription<RecorderEvent> {
        self.shared.events.subscribe()
    }

    fn state(&self) -> RecorderState {
        self.shared.session.lock().state()
    }

    async fn start(&self) -> Result<(), RecorderError> {
        self.shared.session.lock().start()?;
        self.shared.events.emit(RecorderEvent::Start);
        Ok(())
    }

    async fn stop(&self) -> Result<(), RecorderError> {
        self.shared.session.lock().stop()?;
        self.shared.events.emit(RecorderEvent::Stop);
        Ok(())
    }

    async fn pause(&self) -> Result<(), RecorderError> {
        self.shared.session.lock().pause()?;
        self.shared.events.emit(RecorderEvent::Pause);
        Ok(())
    }

    async fn resume(&self) -> Result<(), RecorderError> {
        self.shared.session.lock().resume()?;
        self.shared.events.emit(RecorderEvent::Resume);
        Ok(())
    }
}

pub(super) struct MockTrack;

#[async_trait]
impl VideoTrack for MockTrack {
    fn label(&self) -> &str {
        "mock camera"
    }

    async fn take_photo(&self) -> Result<Blob, CaptureError> {
        Ok(Blob::new(vec![0x89, b'P', b'N', b'G'], MediaType::Png))
    }
}

pub(super) struct MockStream {
    pub(super) id: String,
    pub(super) constraints: CaptureConstraints,
    pub(super) recorder: Arc<RecorderShared>,
    pub(super) active: Mutex<bool>,
}

impl MockStream {
    pub(super) fn emit(&self, event: RecorderEvent) -> usize {
        self.recorder.events.emit(event)
    }

    pub(super) fn chunk(&self, bytes: &[u8]) {
        self.emit(RecorderEvent::DataAvailable(Chunk::from(bytes.to_vec())));
    }
}

impl MediaStream for MockStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn constraints(&self) -> CaptureConstraints {
        self.constraints
    }

    fn create_recorder(&self) -> Result<Box<dyn MediaRecorder>, RecorderError> {
        Ok(Box::new(MockRecorder {
            shared: Arc::clone(&self.recorder),
        }))
    }

    fn video_track(&self) -> Option<Arc<dyn VideoTrack>> {
        Some(Arc::new(MockTrack))
    }

    fn stop(&self) {
        *self.active.lock() = false;
    }

    fn is_active(&self) -> bool {
        *self.active.lock()
    }
}

#[derive(Default)]
pub(super) struct DevicesState {
    pub(super) failure: Option<CaptureError>,
    pub(super) streams: Vec<Arc<MockStream>>,
}

#[derive(Clone, Default)]
pub(super) struct MockDevices {
    pub(super) state: Arc<Mutex<DevicesState>>,
}

impl MockDevices {
    pub(super) fn failing(error: CaptureError) -> Self {
        let devices = Self::default();
        devices.state.lock().failure = Some(error);
        devices
    }

    pub(super) fn latest(&self) -> Arc<MockStream> {
        let state = self.state.lock();
        Arc::clone(state.streams.last().expect("no stream acquired"))
    }

    pub(super) fn acquired(&self) -> usize {
        self.state.lock().streams.len()
    }
}

#[async_trait]
impl MediaDevices for MockDevices {
    async fn get_user_media(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn MediaStream>, CaptureError> {
        let mut state = self.state.lock();
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }
        let stream = Arc::new(MockStream {
            id: format!("mock-{}", state.streams.len()),
            constraints: *constraints,
            recorder: Arc::new(RecorderShared::default()),
            active: Mutex::new(true),
        });
        state.streams.push(Arc::clone(&stream));
        Ok(stream)
    }
}

#[derive(Default)]
pub(super) struct DisplayState {
    pub(super) binds: Vec<(String, bool)>,
    pub(super) source: Option<String>,
    pub(super) paused: bool,
    pub(super) position: f64,
    pub(super) seeks: Vec<f64>,
    pub(super) durations: Vec<f64>,
}

#[derive(Clone, Default)]
pub(super) struct MockDisplay {
    pub(super) state: Arc<Mutex<DisplayState>>,
}

impl MockDisplay {
    pub(super) fn set_position(&self, position: f64) {
        self.state.lock().position = position;
    }
}

#[async_trait]
impl MediaDisplay for MockDisplay {
    async fn bind(&self, url: &str, autoplay: bool) -> Result<(), MediaLoadError> {
        let mut state = self.state.lock();
        state.binds.push((url.to_string(), autoplay));
        state.source = Some(url.to_string());
        state.paused = !autoplay;
        state.position = 0.0;
        Ok(())
    }

    fn set_duration(&self, secs: f64) {
        self.state.lock().durations.push(secs);
    }

    fn unbind(&self) {
        self.state.lock().source = None;
    }

    fn source(&self) -> Option<String> {
        self.state.lock().source.clone()
    }

    async fn play(&self) -> Result<(), MediaLoadError> {
        self.state.lock().paused = false;
        Ok(())
    }

    fn pause(&self) {
        self.state.lock().paused = true;
    }

    fn seek(&self, position: f64) {
        let mut state = self.state.lock();
        state.seeks.push(position);
        state.position = position;
    }

    fn current_time(&self) -> f64 {
        self.state.lock().position
    }

    fn is_paused(&self) -> bool {
        self.state.lock().paused
    }
}

#[derive(Clone, Copy)]
pub(super) struct MockProber {
    pub(super) on_load: ReportedDuration,
    pub(super) after_seek: ReportedDuration,
}

impl MockProber {
    pub(super) fn finite(secs: f64) -> Self {
        Self {
            on_load: ReportedDuration::Finite(secs),
            after_seek: ReportedDuration::Finite(secs),
        }
    }
}

pub(super) struct MockElement {
    pub(super) prober: MockProber,
}

#[async_trait]
impl ProbeElement for MockElement {
    async fn load_metadata(&mut self, _blob: &Blob) -> Result<ReportedDuration, MediaLoadError> {
        Ok(self.prober.on_load)
    }

    async fn seek_and_wait_update(
        &mut self,
        _position: f64,
    ) -> Result<ReportedDuration, MediaLoadError> {
        Ok(self.prober.after_seek)
    }

    fn reset_position(&mut self) {}
}

impl MediaProber for MockProber {
    fn create_element(&self) -> Box<dyn ProbeElement> {
        Box::new(MockElement { prober: *self })
    }
}

#[derive(Default)]
pub(super) struct ViewState {
    pub(super) visible: HashMap<Element, bool>,
    pub(super) texts: HashMap<TextOutput, String>,
    pub(super) slider_value: f64,
    pub(super) slider_max: f64,
    pub(super) image: Option<String>,
    pub(super) statuses: Vec<SessionSnapshot>,
}

#[derive(Clone, Default)]
pub(super) struct RecordingView {
    pub(super) state: Arc<Mutex<ViewState>>,
}

impl RecordingView {
    pub(super) fn visible(&self, element: Element) -> bool {
        self.state.lock().visible.get(&element).copied().unwrap_or(false)
    }

    pub(super) fn text(&self, output: TextOutput) -> String {
        self.state.lock().texts.get(&output).cloned().unwrap_or_default()
    }

    pub(super) fn slider(&self) -> (f64, f64) {
        let state = self.state.lock();
        (state.slider_value, state.slider_max)
    }
}

impl WidgetView for RecordingView {
    fn set_visible(&self, element: Element, visible: bool) {
        self.state.lock().visible.insert(element, visible);
    }

    fn set_text(&self, output: TextOutput, text: &str) {
        self.state.lock().texts.insert(output, text.to_string());
    }

    fn set_slider_value(&self, value: f64) {
        self.state.lock().slider_value = value;
    }

    fn set_slider_max(&self, max: f64) {
        self.state.lock().slider_max = max;
    }

    fn set_image_source(&self, url: &str) {
        self.state.lock().image = Some(url.to_string());
    }

    fn show_status(&self, snapshot: &SessionSnapshot) {
        self.state.lock().statuses.push(snapshot.clone());
    }
}

#[derive(Clone, Default)]
pub(super) struct MockAlerter {
    pub(super) messages: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Alerter for MockAlerter {
    async fn alert(&self, message: &str) -> Result<(), AlertError> {
        self.messages.lock().push(message.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct TestUrls {
    pub(super) next: Mutex<u64>,
    pub(super) live: Mutex<HashMap<String, ObjectSource>>,
}

impl TestUrls {
    pub(super) fn live_count(&self) -> usize {
        self.live.lock().len()
    }
}

impl ObjectUrls for TestUrls {
    fn create(&self, source: ObjectSource) -> String {
        let mut next = self.next.lock();
        *next += 1;
        let url = format!("blob:test/{}", *next);
        self.live.lock().insert(url.clone(), source);
        url
    }

    fn resolve(&self, url: &str) -> Option<ObjectSource> {
        self.live.lock().get(url).cloned()
    }

    fn revoke(&self, url: &str) -> bool {
        self.live.lock().remove(url).is_some()
    }
}

pub(super) type TestWidget =
    RecorderWidget<MockDevices, MockDisplay, MockProber, RecordingView, MockAlerter>;

pub(super) struct Harness {
    pub(super) widget: TestWidget,
    pub(super) devices: MockDevices,
    pub(super) display: MockDisplay,
    pub(super) view: RecordingView,
    pub(super) alerter: MockAlerter,
    pub(super) urls: Arc<TestUrls>,
}

pub(super) fn harness_with(devices: MockDevices, prober: MockProber) -> Harness {
    let display = MockDisplay::default();
    let view = RecordingView::default();
    let alerter = MockAlerter::default();
    let urls = Arc::new(TestUrls::default());
    let mut widget = RecorderWidget::new(
        devices.clone(),
        display.clone(),
        prober,
        view.clone(),
        alerter.clone(),
        urls.clone(),
        WidgetConfig::default(),
    );
    widget.initialize_view();
    Harness {
        widget,
        devices,
        display,
        view,
        alerter,
        urls,
    }
}

pub(super) fn harness(duration_secs: f64) -> Harness {
    harness_with(MockDevices::default(), MockProber::finite(duration_secs))
}

/// Handle every recorder event queued on the widget's subscription
pub(super) async fn pump(widget: &mut TestWidget) -> Result<(), WidgetError> {
    loop {
        let event = match widget.subscription.as_mut() {
            Some(sub) => sub.try_recv(),
            None => None,
        };
        let Some(event) = event else {
            return Ok(());
        };
        widget.handle(WidgetEvent::Recorder(event)).await?;
    }
}

pub(super) async fn control(widget: &mut TestWidget, control: Control) -> Result<(), WidgetError> {
    widget.handle(WidgetEvent::Control(control)).await?;
    pump(widget).await
}

/// Acquire, record three chunks and stop
pub(super) async fn record_session(h: &mut Harness) -> Result<(), WidgetError> {
    h.widget.acquire().await?;
    control(&mut h.widget, Control::StartRecord).await?;
    let stream = h.devices.latest();
    stream.chunk(b"F1");
    stream.chunk(b"F2");
    stream.chunk(b"F3");
    control(&mut h.widget, Control::StopRecord).await
}
